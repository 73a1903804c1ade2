use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::user_record;

use crate::errors::ServiceError;
use crate::user_record::repository::UserRecordRepository;

/// Application service for basket-pickup records.
pub struct RecordService<R: UserRecordRepository> {
    repo: Arc<R>,
}

impl<R: UserRecordRepository> Clone for RecordService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: UserRecordRepository> RecordService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register a person. A phone already on file yields `ServiceError::Constraint`.
    #[instrument(skip(self, address, phone))]
    pub async fn create(&self, name: &str, address: &str, phone: &str) -> Result<user_record::Model, ServiceError> {
        match self.repo.create(name, address, phone).await {
            Ok(rec) => {
                info!(id = rec.id, "user_record_created");
                Ok(rec)
            }
            Err(e @ ServiceError::Constraint(_)) => {
                warn!(err = %e, "duplicate phone rejected");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self, id: i32) -> Result<user_record::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    /// Set the pickup flag. Calling it again on a collected record is a no-op success.
    #[instrument(skip(self))]
    pub async fn mark_picked_up(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.mark_picked_up(id).await? {
            return Err(ServiceError::not_found("user"));
        }
        info!(id, "basket_picked_up");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<user_record::Model>, ServiceError> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use crate::user_record::SeaOrmUserRecordRepository;

    async fn service() -> anyhow::Result<RecordService<SeaOrmUserRecordRepository>> {
        let db = get_db().await?;
        Ok(RecordService::new(Arc::new(SeaOrmUserRecordRepository::new(db))))
    }

    #[tokio::test]
    async fn create_get_and_mark() -> anyhow::Result<()> {
        let svc = service().await?;

        let ana = svc.create("Ana", "Rua A, 10", "+551199999").await?;
        assert_eq!(ana.id, 1);
        assert!(!ana.picked_up);

        svc.mark_picked_up(ana.id).await?;
        svc.mark_picked_up(ana.id).await?;

        let found = svc.get(ana.id).await?;
        assert!(found.picked_up);
        assert_eq!(found.phone, "+551199999");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() -> anyhow::Result<()> {
        let svc = service().await?;
        assert!(matches!(svc.get(9999).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.mark_picked_up(9999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_phone_keeps_first_record() -> anyhow::Result<()> {
        let svc = service().await?;
        let first = svc.create("Ana", "Rua A, 10", "+551199999").await?;

        let err = svc.create("Bia", "Rua B, 20", "+551199999").await.unwrap_err();
        assert!(matches!(err, ServiceError::Constraint(_)), "unexpected error: {err:?}");

        assert_eq!(svc.get(first.id).await?, first);
        assert_eq!(svc.list().await?, vec![first]);
        Ok(())
    }

    #[tokio::test]
    async fn fresh_ids_are_never_reused() -> anyhow::Result<()> {
        let svc = service().await?;
        let mut seen = std::collections::HashSet::new();
        for i in 0..10 {
            let rec = svc.create(&format!("P{i}"), "Rua", &format!("+55{i:04}")).await?;
            assert!(seen.insert(rec.id));
            assert!(!rec.picked_up);
        }
        assert_eq!(svc.list().await?.len(), 10);
        Ok(())
    }
}
