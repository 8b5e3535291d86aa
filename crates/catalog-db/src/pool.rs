//! # Pool Setup
//!
//! Opens the SQLite pool the catalog runs on and hands out repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogConfig::db_config() ──► DbConfig { path, pool sizes, ... }     │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │  Database::new ── connect options ── PRAGMA foreign_keys = ON          │
//! │        │                             synchronous = NORMAL              │
//! │        │                             journal = WAL (file only)         │
//! │        ▼                                                                │
//! │  embedded migrations (001_initial_schema.sql)                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Database { SqlitePool } ──► products()   ──► ProductRepository        │
//! │        (Clone, shared)   ──► categories() ──► CategoryRepository       │
//! │                                                                         │
//! │  Each axum request borrows one pooled connection; batch delete keeps   │
//! │  its connection for the whole transaction.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File vs. In-Memory
//! File databases run in WAL mode so readers don't block the writer.
//! `:memory:` databases live inside a single connection, so the pool is
//! pinned to exactly one connection that is never reaped.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Pool and file settings for [`Database::new`].
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/catalog.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Upper bound on pooled connections (default 5).
    pub max_connections: u32,

    /// Connections kept open while idle (default 1).
    pub min_connections: u32,

    /// Acquire timeout (default 30s).
    pub connect_timeout: Duration,

    /// Idle connections older than this are closed; `None` keeps them.
    pub idle_timeout: Option<Duration>,

    /// Apply embedded migrations after connecting (default on).
    pub run_migrations: bool,
}

impl DbConfig {
    /// Settings for the database file at `path`.
    ///
    /// The file is created if it doesn't exist. Passing `:memory:` behaves
    /// like [`DbConfig::in_memory`] with the given pool settings ignored.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for tests and demos).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Isolated database, gone when the pool closes
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(MEMORY_PATH),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None, // Reaping the connection would drop the data
            run_migrations: true,
        }
    }

    /// True when this config points at a `:memory:` database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle over the catalog's connection pool.
///
/// Cheap to clone: clones share the same pool. The HTTP layer keeps one in
/// its router state and hands out repositories per request.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn get_product(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Product>> {
///     let product = state.db.products().get_by_id(id).await?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database described by `config` and
    /// applies migrations unless they are turned off.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening catalog database"
        );

        let in_memory = config.is_in_memory();

        let base_options = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true)
        };

        let connect_options = base_options
            .synchronous(SqliteSynchronous::Normal)
            // Off by default in SQLite; category_id relies on it
            .foreign_keys(true);

        debug!(in_memory, "Connection options configured");

        let (max_connections, min_connections, idle_timeout) = if in_memory {
            (1, 1, None)
        } else {
            (config.max_connections, config.min_connections, config.idle_timeout)
        };

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(idle_timeout);

        if in_memory {
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections, "Database pool created");

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending embedded migrations.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Catalog schema up to date");
        Ok(())
    }

    /// Raw pool, for migrations and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Product queries and mutations.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Category lookups.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    /// Waits for checked-out connections and shuts the pool. Later queries
    /// fail, and [`Database::health_check`] reports false.
    pub async fn close(&self) {
        info!("Closing catalog database");
        self.pool.close().await;
    }

    /// `SELECT 1` round-trip; backs `GET /health`.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
