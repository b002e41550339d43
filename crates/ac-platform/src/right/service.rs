//! Right Service

use tracing::{debug, info};

use crate::right::entity::{Right, RightInput};
use crate::right::repository::RightRepository;
use crate::shared::database::Database;
use crate::shared::error::{PlatformError, Result};
use crate::shared::validation::validate_name;

#[derive(Debug, Clone)]
pub struct RightService {
    db: Database,
    repo: RightRepository,
}

impl RightService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            repo: RightRepository::new(),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Right>> {
        let mut tx = self.db.begin_read().await?;
        let rights = self.repo.find_all(&mut tx).await?;
        tx.commit().await?;
        Ok(rights)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Right>> {
        let mut tx = self.db.begin_read().await?;
        let right = self.repo.find_by_id(&mut tx, id).await?;
        tx.commit().await?;
        Ok(right)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Right>> {
        let mut tx = self.db.begin_read().await?;
        let right = self.repo.find_by_name(&mut tx, name).await?;
        tx.commit().await?;
        Ok(right)
    }

    pub async fn get_details(&self, id: i64) -> Result<Right> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Right", id))
    }

    pub async fn create(&self, input: &RightInput) -> Result<Right> {
        validate_name("Right", &input.name)?;

        let mut tx = self.db.begin().await?;
        if self.repo.find_by_name(&mut tx, &input.name).await?.is_some() {
            debug!(name = %input.name, "Right name already taken");
            return Err(PlatformError::duplicate("Right", "name", &input.name));
        }

        let right = self
            .repo
            .insert(&mut tx, &input.name, input.description.as_deref(), ac_common::now_millis())
            .await?;
        tx.commit().await?;

        info!(right_id = right.id, name = %right.name, "Right created");
        Ok(right)
    }

    pub async fn update(&self, id: i64, input: &RightInput) -> Result<Right> {
        validate_name("Right", &input.name)?;

        let mut tx = self.db.begin().await?;
        if !self.repo.exists(&mut tx, id).await? {
            return Err(PlatformError::not_found("Right", id));
        }
        if let Some(other) = self.repo.find_by_name(&mut tx, &input.name).await? {
            if other.id != id {
                debug!(right_id = id, name = %input.name, "Right name held by another right");
                return Err(PlatformError::duplicate("Right", "name", &input.name));
            }
        }

        self.repo
            .update(&mut tx, id, &input.name, input.description.as_deref(), ac_common::now_millis())
            .await?;
        let right = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Right", id))?;
        tx.commit().await?;

        info!(right_id = id, "Right updated");
        Ok(right)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.db.begin().await?;
        if !self.repo.delete(&mut tx, id).await? {
            return Err(PlatformError::not_found("Right", id));
        }
        tx.commit().await?;

        info!(right_id = id, "Right deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> RightService {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        RightService::new(db)
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let svc = service().await;
        let right = svc
            .create(&RightInput::new("read").with_description("Read access"))
            .await
            .unwrap();

        let details = svc.get_details(right.id).await.unwrap();
        assert_eq!(details.name, "read");
        assert_eq!(details.description.as_deref(), Some("Read access"));
        assert!(details.modified_at.is_none());
        assert_eq!(svc.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let svc = service().await;
        svc.create(&RightInput::new("read")).await.unwrap();

        let err = svc.create(&RightInput::new("read")).await.unwrap_err();
        assert!(matches!(err, PlatformError::Duplicate { .. }));
        assert_eq!(svc.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_sets_modified_at() {
        let svc = service().await;
        let right = svc.create(&RightInput::new("read")).await.unwrap();

        let updated = svc
            .update(right.id, &RightInput::new("read").with_description("changed"))
            .await
            .unwrap();
        assert_eq!(updated.description.as_deref(), Some("changed"));
        assert_eq!(updated.created_at, right.created_at);
        assert!(updated.modified_at.is_some());
    }

    #[tokio::test]
    async fn test_update_to_other_name_rejected() {
        let svc = service().await;
        svc.create(&RightInput::new("read")).await.unwrap();
        let write = svc.create(&RightInput::new("write")).await.unwrap();

        let err = svc.update(write.id, &RightInput::new("read")).await.unwrap_err();
        assert!(matches!(err, PlatformError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_missing_right() {
        let svc = service().await;
        assert!(svc.get_by_id(5).await.unwrap().is_none());
        assert!(matches!(svc.get_details(5).await, Err(PlatformError::NotFound { .. })));
        assert!(matches!(
            svc.update(5, &RightInput::new("x")).await,
            Err(PlatformError::NotFound { .. })
        ));
        assert!(matches!(svc.delete(5).await, Err(PlatformError::NotFound { .. })));
    }
}
