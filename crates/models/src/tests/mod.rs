
use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::db::{connect_and_migrate, DatabaseConfig};

/// Fresh database file per test so ids start at 1.
pub async fn scratch_db() -> Result<DatabaseConnection> {
    let path = std::env::temp_dir().join(format!("cestas-models-{}.db", uuid::Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        ..Default::default()
    };
    connect_and_migrate(&cfg).await
}
