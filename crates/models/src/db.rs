use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

pub use configs::DatabaseConfig;

/// Open a pool with the limits and timeouts from `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// Connect and create the schema if it is absent.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    info!(max_connections = cfg.max_connections, "database ready");
    Ok(db)
}
