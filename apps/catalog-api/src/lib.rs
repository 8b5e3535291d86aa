//! # Catalog API
//!
//! HTTP service exposing the product catalog over three route sets that
//! share one service and one SQLite database.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          catalog-api                                    │
//! │                                                                         │
//! │   main.rs ──► config ──► Database::new ──► seed (optional)             │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │   routes ──────────────► service::CatalogService ──► catalog-db        │
//! │     │                            │                                      │
//! │     └────── error::ApiError ◄────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

use tracing::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,catalog=debug,sqlx=warn,tower_http=debug";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish()
}
