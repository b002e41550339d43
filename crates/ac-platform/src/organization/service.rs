//! Organization Service

use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::organization::entity::{Organization, OrganizationDetails, OrganizationInput};
use crate::organization::repository::OrganizationRepository;
use crate::shared::database::Database;
use crate::shared::error::{PlatformError, Result};
use crate::shared::validation::validate_name;
use crate::user::entity::UserSummary;
use crate::user::repository::UserRepository;

#[derive(Debug, Clone)]
pub struct OrganizationService {
    db: Database,
    repo: OrganizationRepository,
    user_repo: UserRepository,
}

impl OrganizationService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            repo: OrganizationRepository::new(),
            user_repo: UserRepository::new(),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Organization>> {
        let mut tx = self.db.begin_read().await?;
        let organizations = self.repo.find_all(&mut tx).await?;
        tx.commit().await?;
        Ok(organizations)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Organization>> {
        let mut tx = self.db.begin_read().await?;
        let organization = self.repo.find_by_id(&mut tx, id).await?;
        tx.commit().await?;
        Ok(organization)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Organization>> {
        let mut tx = self.db.begin_read().await?;
        let organization = self.repo.find_by_name(&mut tx, name).await?;
        tx.commit().await?;
        Ok(organization)
    }

    pub async fn get_details(&self, id: i64) -> Result<OrganizationDetails> {
        let mut tx = self.db.begin_read().await?;
        let details = self.load_details(&mut tx, id).await?;
        tx.commit().await?;
        Ok(details)
    }

    pub async fn create(&self, input: &OrganizationInput) -> Result<OrganizationDetails> {
        validate_name("Organization", &input.name)?;

        let mut tx = self.db.begin().await?;
        if self.repo.find_by_name(&mut tx, &input.name).await?.is_some() {
            debug!(name = %input.name, "Organization name already taken");
            return Err(PlatformError::duplicate("Organization", "name", &input.name));
        }

        let organization = self.repo.insert(&mut tx, &input.name).await?;
        tx.commit().await?;

        info!(organization_id = organization.id, name = %organization.name, "Organization created");
        Ok(OrganizationDetails::new(organization, Vec::new()))
    }

    pub async fn update(&self, id: i64, input: &OrganizationInput) -> Result<OrganizationDetails> {
        validate_name("Organization", &input.name)?;

        let mut tx = self.db.begin().await?;
        if !self.repo.exists(&mut tx, id).await? {
            return Err(PlatformError::not_found("Organization", id));
        }
        if let Some(other) = self.repo.find_by_name(&mut tx, &input.name).await? {
            if other.id != id {
                debug!(organization_id = id, name = %input.name, "Organization name held by another organization");
                return Err(PlatformError::duplicate("Organization", "name", &input.name));
            }
        }

        self.repo.update(&mut tx, id, &input.name).await?;
        let details = self.load_details(&mut tx, id).await?;
        tx.commit().await?;

        info!(organization_id = id, "Organization updated");
        Ok(details)
    }

    /// Delete an organization that has no users left.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.db.begin().await?;
        if !self.repo.exists(&mut tx, id).await? {
            return Err(PlatformError::not_found("Organization", id));
        }

        let members = self.user_repo.count_by_organization(&mut tx, id).await?;
        if members > 0 {
            debug!(organization_id = id, members, "Refusing to delete organization with users");
            return Err(PlatformError::validation(format!(
                "Organization {} still has {} user(s)",
                id, members
            )));
        }

        self.repo.delete(&mut tx, id).await?;
        tx.commit().await?;

        info!(organization_id = id, "Organization deleted");
        Ok(())
    }

    async fn load_details(&self, conn: &mut SqliteConnection, id: i64) -> Result<OrganizationDetails> {
        let organization = self
            .repo
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Organization", id))?;
        let users = self
            .user_repo
            .find_by_organization(conn, id)
            .await?
            .iter()
            .map(UserSummary::from)
            .collect();
        Ok(OrganizationDetails::new(organization, users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password_service::PasswordService;
    use crate::user::{UserCreate, UserService};

    async fn services() -> (OrganizationService, UserService) {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        (
            OrganizationService::new(db.clone()),
            UserService::new(db, PasswordService::for_testing()),
        )
    }

    #[tokio::test]
    async fn test_create_and_details() {
        let (orgs, _) = services().await;
        let created = orgs.create(&OrganizationInput::new("Acme")).await.unwrap();
        assert!(created.users.is_empty());

        let details = orgs.get_details(created.id).await.unwrap();
        assert_eq!(details.name, "Acme");
        assert_eq!(orgs.get_by_name("Acme").await.unwrap().map(|o| o.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_duplicate_and_rename() {
        let (orgs, _) = services().await;
        let acme = orgs.create(&OrganizationInput::new("Acme")).await.unwrap();
        let globex = orgs.create(&OrganizationInput::new("Globex")).await.unwrap();

        assert!(matches!(
            orgs.create(&OrganizationInput::new("Acme")).await,
            Err(PlatformError::Duplicate { .. })
        ));
        assert!(matches!(
            orgs.update(globex.id, &OrganizationInput::new("Acme")).await,
            Err(PlatformError::Duplicate { .. })
        ));

        let same = orgs.update(acme.id, &OrganizationInput::new("Acme")).await.unwrap();
        assert_eq!(same.name, "Acme");
        let renamed = orgs.update(acme.id, &OrganizationInput::new("Acme Corp")).await.unwrap();
        assert_eq!(renamed.name, "Acme Corp");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("access.db").display());
        let db = Database::connect(&url, 5).await.unwrap();
        db.init_schema().await.unwrap();
        let orgs = OrganizationService::new(db.clone());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let orgs = orgs.clone();
                tokio::spawn(async move {
                    orgs.create(&OrganizationInput::new(format!("Org {}", i % 8))).await
                })
            })
            .collect();

        let (mut created, mut duplicates) = (0, 0);
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(PlatformError::Duplicate { .. }) => duplicates += 1,
                Err(err) => panic!("unexpected error: {}", err),
            }
        }
        assert_eq!((created, duplicates), (8, 8));
        assert_eq!(orgs.get_all().await.unwrap().len(), 8);
        db.close().await;
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (orgs, _) = services().await;
        assert!(matches!(
            orgs.create(&OrganizationInput::new("  ")).await,
            Err(PlatformError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_members() {
        let (orgs, users) = services().await;
        let acme = orgs.create(&OrganizationInput::new("Acme")).await.unwrap();
        let user = users.create(&UserCreate::new("a@b.com", acme.id)).await.unwrap();

        let details = orgs.get_details(acme.id).await.unwrap();
        assert_eq!(details.users.len(), 1);
        assert_eq!(details.users[0].email, "a@b.com");

        assert!(matches!(orgs.delete(acme.id).await, Err(PlatformError::Validation { .. })));

        users.delete(user.id).await.unwrap();
        orgs.delete(acme.id).await.unwrap();
        assert!(orgs.get_by_id(acme.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_organization() {
        let (orgs, _) = services().await;
        assert!(matches!(orgs.get_details(1).await, Err(PlatformError::NotFound { .. })));
        assert!(matches!(orgs.delete(1).await, Err(PlatformError::NotFound { .. })));
    }
}
