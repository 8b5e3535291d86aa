//! Catalog API server entry point.
//!
//! ```text
//! CATALOG_PORT=8080 CATALOG_DB_PATH=catalog.db cargo run -p catalog-api
//! ```

use tokio::net::TcpListener;
use tracing::info;

use catalog_api::config::CatalogConfig;
use catalog_api::routes::build_router;
use catalog_api::service::CatalogService;
use catalog_db::seed::seed_demo_catalog;
use catalog_db::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    catalog_api::init_tracing();

    info!("Starting catalog API server...");

    let config = CatalogConfig::load()?;
    info!(
        addr = %config.socket_addr(),
        db_path = %config.db_path,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()).await?;

    if config.seed_demo_data && seed_demo_catalog(&db).await? {
        info!("Demo catalog seeded");
    }

    let router = build_router(CatalogService::new(db.clone(), config.query_limits()));

    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
