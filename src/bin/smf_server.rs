//! SMF intake REST API server
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/smf cargo run --bin smf_server --features server
//!
//! curl -X POST http://localhost:8000/public/bol-bs \
//!   -H "Content-Type: application/json" \
//!   -d '[{"company_id": "C1", "year": 2023, "Assets": 1000}]'
//!
//! curl http://localhost:8000/ping
//! ```

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use smf_api::api::{create_router, AppState};
use smf_api::config::AppConfig;
use smf_api::database::{DatabaseConfig, DatabaseManager};
use smf_api::repository::RecordRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smf_api=info,tower_http=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    let db = DatabaseManager::new(DatabaseConfig::default())
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        db.run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let repository: Arc<dyn RecordRepository> = Arc::new(db.record_repository());
    let state = AppState::new(repository, &config);
    let app = create_router(state, &config);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!(
        "smf_server listening on {} (prefix '{}', strict mapping: {}, auth: {})",
        bind_addr,
        config.route_prefix,
        config.strict_mapping,
        if config.jwt_secret.is_some() { "enabled" } else { "disabled" }
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
