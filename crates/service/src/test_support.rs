#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_and_migrate, DatabaseConfig};

/// Fresh SQLite file per test; schema created on connect.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let path = std::env::temp_dir().join(format!("cestas-service-{}.db", uuid::Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        acquire_timeout_secs: 10,
        ..Default::default()
    };
    connect_and_migrate(&cfg).await
}
