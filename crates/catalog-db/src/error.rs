//! # Storage Errors
//!
//! What a repository call can fail with, already sorted into the cases the
//! HTTP layer answers differently.
//!
//! ```text
//!   sqlx::Error / MigrateError
//!          │  From
//!          ▼
//!   DbError ── NotFound ──────────► 404
//!          ├── Conflict ──────────► 409
//!          ├── ForeignKeyViolation► 400
//!          └── everything else ───► 500 (logged by catalog-api)
//! ```

use thiserror::Error;

/// Failure of a catalog-db operation.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with this id.
    ///
    /// ## When This Occurs
    /// - Lookup by an id that was never assigned or was deleted
    /// - Replace of a row removed by a concurrent request
    /// - Any id of a batch delete is missing
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Optimistic concurrency check failed.
    ///
    /// ## When This Occurs
    /// - Replace carrying a `version` that is no longer current: the row
    ///   still exists but another write bumped its version first
    #[error("{entity} {id} was modified by another request")]
    Conflict { entity: String, id: String },

    /// `products.category_id` points at no category, or a category with
    /// products was about to be removed.
    #[error("Foreign key constraint: {message}")]
    ForeignKeyViolation { message: String },

    /// The file could not be opened, or the pool is closed.
    #[error("Cannot reach database: {0}")]
    ConnectionFailed(String),

    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement for a reason other than a constraint.
    #[error("Statement failed: {0}")]
    QueryFailed(String),

    /// `BEGIN` or `COMMIT` failed.
    #[error("Transaction error: {0}")]
    TransactionFailed(String),

    /// No connection became free within the acquire timeout.
    #[error("Timed out waiting for a database connection")]
    PoolExhausted,

    #[error("Unexpected database error: {0}")]
    Internal(String),
}

impl DbError {
    /// `NotFound` for `entity` number `id`.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// `Conflict` for `entity` number `id`.
    pub fn conflict(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::Conflict {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", "?"),
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation()
                    || db_err.message().contains("FOREIGN KEY constraint failed") =>
            {
                DbError::ForeignKeyViolation {
                    message: db_err.message().to_string(),
                }
            }
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Shorthand for `Result<T, DbError>`.
pub type DbResult<T> = Result<T, DbError>;
