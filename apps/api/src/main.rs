//! # SWIFT Code Registry Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  init tracing (RUST_LOG, default info)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiConfig::load()  (.env, swift-api.toml, SWIFT_*)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new  (pool + migrations)                                    │
//! │       │                                                                 │
//! │       ├── SWIFT_IMPORT_CSV set? import_csv (failure is logged only)    │
//! │       ▼                                                                 │
//! │  axum::serve ... with_graceful_shutdown(ctrl-c / SIGTERM)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close pool                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{Context, Result};
use swift_api::{router, ApiConfig, AppState};
use swift_db::{import_csv, Database, DbConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("Starting SWIFT code registry...");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        address = %config.bind_address(),
        database = %config.database_path.display(),
        timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.database_path).max_connections(config.db_max_connections);
    let db = Database::new(db_config)
        .await
        .context("opening database")?;

    if let Some(csv_path) = &config.import_csv {
        match import_csv(&db, csv_path).await {
            Ok(report) => info!(
                inserted = report.inserted,
                skipped = report.skipped,
                duplicates = report.duplicates,
                "Startup import finished"
            ),
            Err(e) => warn!(error = %e, path = %csv_path.display(), "Startup import failed, continuing"),
        }
    }

    let app = router(AppState::new(db.clone(), config.request_timeout()));

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("binding {}", config.bind_address()))?;
    info!("✓ Server listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Installs the fmt subscriber, filtered by `RUST_LOG`.
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "swift_api=info,swift_core=info,swift_db=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Graceful shutdown signal handler.
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
