use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Prepare the database: directory, pool and schema.
pub async fn init_db(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    common::env::ensure_data_dir(&cfg.database.url)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    models::db::connect_and_migrate(&cfg.database).await
}

/// Router over an already-migrated connection.
pub fn build_app(db: DatabaseConnection) -> Router {
    routes::build_router(AppState::new(db), routes::build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: open the database, serve HTTP until Ctrl+C, then close the pool.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = init_db(&cfg).await?;
    let app = build_app(db.clone());

    let addr = bind_addr(&cfg)?;
    info!(%addr, database = %cfg.database.url, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!(event = "db_closed", "connection pool released");
    Ok(())
}
