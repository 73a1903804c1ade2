use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::user_record;

use crate::errors::ServiceError;

#[async_trait]
pub trait UserRecordRepository: Send + Sync {
    async fn create(&self, name: &str, address: &str, phone: &str) -> Result<user_record::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<user_record::Model>, ServiceError>;
    /// Returns `false` when no record has `id`.
    async fn mark_picked_up(&self, id: i32) -> Result<bool, ServiceError>;
    async fn list(&self) -> Result<Vec<user_record::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmUserRecordRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl UserRecordRepository for SeaOrmUserRecordRepository {
    async fn create(&self, name: &str, address: &str, phone: &str) -> Result<user_record::Model, ServiceError> {
        Ok(user_record::create(&self.db, name, address, phone).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<user_record::Model>, ServiceError> {
        Ok(user_record::find(&self.db, id).await?)
    }

    async fn mark_picked_up(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(user_record::mark_picked_up(&self.db, id).await?.is_some())
    }

    async fn list(&self) -> Result<Vec<user_record::Model>, ServiceError> {
        Ok(user_record::list(&self.db).await?)
    }
}
