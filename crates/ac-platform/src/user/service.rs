//! User Service

use std::sync::Arc;

use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::auth::password_service::PasswordService;
use crate::organization::repository::OrganizationRepository;
use crate::role::repository::RoleRepository;
use crate::shared::database::Database;
use crate::shared::error::{PlatformError, Result};
use crate::shared::validation::{unique_ids, validate_email};
use crate::user::entity::{User, UserCreate, UserDetails, UserSummary, UserUpdate};
use crate::user::repository::UserRepository;

#[derive(Debug, Clone)]
pub struct UserService {
    db: Database,
    passwords: Arc<PasswordService>,
    repo: UserRepository,
    organization_repo: OrganizationRepository,
    role_repo: RoleRepository,
}

impl UserService {
    pub fn new(db: Database, passwords: PasswordService) -> Self {
        Self {
            db,
            passwords: Arc::new(passwords),
            repo: UserRepository::new(),
            organization_repo: OrganizationRepository::new(),
            role_repo: RoleRepository::new(),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<UserSummary>> {
        let mut tx = self.db.begin_read().await?;
        let users = self.repo.find_all(&mut tx).await?;
        tx.commit().await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<UserSummary>> {
        let mut tx = self.db.begin_read().await?;
        let user = self.repo.find_by_id(&mut tx, id).await?;
        tx.commit().await?;
        Ok(user.as_ref().map(UserSummary::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<UserSummary>> {
        let mut tx = self.db.begin_read().await?;
        let user = self.repo.find_by_email(&mut tx, email).await?;
        tx.commit().await?;
        Ok(user.as_ref().map(UserSummary::from))
    }

    pub async fn get_details(&self, id: i64) -> Result<UserDetails> {
        let mut tx = self.db.begin_read().await?;
        let details = self.load_details(&mut tx, id).await?;
        tx.commit().await?;
        Ok(details)
    }

    pub async fn create(&self, input: &UserCreate) -> Result<UserDetails> {
        validate_email(&input.email)?;
        let password_hash = self.hash(input.password.as_deref())?;

        let mut tx = self.db.begin().await?;
        if self.repo.find_by_email(&mut tx, &input.email).await?.is_some() {
            debug!(email = %input.email, "Email already registered");
            return Err(PlatformError::duplicate("User", "email", &input.email));
        }
        if !self.organization_repo.exists(&mut tx, input.organization_id).await? {
            return Err(PlatformError::not_found("Organization", input.organization_id));
        }

        let mut user = User {
            id: 0,
            email: input.email.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            password_hash,
            is_active: input.is_active,
            is_admin: input.is_admin,
            organization_id: input.organization_id,
        };
        user.id = self.repo.insert(&mut tx, &user).await?;
        let details = self.load_details(&mut tx, user.id).await?;
        tx.commit().await?;

        info!(user_id = user.id, organization_id = user.organization_id, "User created");
        Ok(details)
    }

    pub async fn update(&self, id: i64, input: &UserUpdate) -> Result<UserDetails> {
        let password_hash = self.hash(input.password.as_deref())?;

        let mut tx = self.db.begin().await?;
        let existing = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| PlatformError::not_found("User", id))?;
        if !self.organization_repo.exists(&mut tx, input.organization_id).await? {
            return Err(PlatformError::not_found("Organization", input.organization_id));
        }

        let user = User {
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            password_hash: password_hash.or(existing.password_hash),
            is_active: input.is_active,
            is_admin: input.is_admin,
            organization_id: input.organization_id,
            ..existing
        };
        self.repo.update(&mut tx, &user).await?;
        let details = self.load_details(&mut tx, id).await?;
        tx.commit().await?;

        info!(user_id = id, organization_id = user.organization_id, "User updated");
        Ok(details)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.db.begin().await?;
        if !self.repo.delete(&mut tx, id).await? {
            return Err(PlatformError::not_found("User", id));
        }
        tx.commit().await?;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Assign roles to a user.
    ///
    /// Every id is resolved before anything is written, so one unknown id
    /// leaves the user unchanged. Roles already held are skipped.
    pub async fn add_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<UserDetails> {
        let role_ids = unique_ids(role_ids);

        let mut tx = self.db.begin().await?;
        self.check_links(&mut tx, user_id, &role_ids).await?;

        let attached = self
            .repo
            .attach_roles(&mut tx, user_id, &role_ids, ac_common::now_millis())
            .await?;
        let details = self.load_details(&mut tx, user_id).await?;
        tx.commit().await?;

        info!(user_id, attached, "Roles assigned to user");
        Ok(details)
    }

    /// Revoke roles from a user. Roles the user does not hold are ignored.
    pub async fn remove_roles(&self, user_id: i64, role_ids: &[i64]) -> Result<UserDetails> {
        let role_ids = unique_ids(role_ids);

        let mut tx = self.db.begin().await?;
        self.check_links(&mut tx, user_id, &role_ids).await?;

        let detached = self.repo.detach_roles(&mut tx, user_id, &role_ids).await?;
        let details = self.load_details(&mut tx, user_id).await?;
        tx.commit().await?;

        info!(user_id, detached, "Roles revoked from user");
        Ok(details)
    }

    /// Check a plain-text password against the stored hash.
    /// Users without a password never match.
    pub async fn verify_password(&self, user_id: i64, password: &str) -> Result<bool> {
        let mut tx = self.db.begin_read().await?;
        let user = self
            .repo
            .find_by_id(&mut tx, user_id)
            .await?
            .ok_or_else(|| PlatformError::not_found("User", user_id))?;
        tx.commit().await?;

        match user.password_hash {
            Some(hash) => self.passwords.verify_password(password, &hash),
            None => Ok(false),
        }
    }

    /// Reject a password the configured policy would refuse, without storing anything.
    pub fn check_password(&self, password: &str) -> Result<()> {
        self.passwords.check_policy(password)
    }

    fn hash(&self, password: Option<&str>) -> Result<Option<String>> {
        password.map(|p| self.passwords.hash_password(p)).transpose()
    }

    async fn check_links(&self, conn: &mut SqliteConnection, user_id: i64, role_ids: &[i64]) -> Result<()> {
        if !self.repo.exists(conn, user_id).await? {
            return Err(PlatformError::not_found("User", user_id));
        }
        for &role_id in role_ids {
            if !self.role_repo.exists(conn, role_id).await? {
                debug!(user_id, role_id, "Unknown role in link request");
                return Err(PlatformError::not_found("Role", role_id));
            }
        }
        Ok(())
    }

    async fn load_details(&self, conn: &mut SqliteConnection, id: i64) -> Result<UserDetails> {
        let user = self
            .repo
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| PlatformError::not_found("User", id))?;
        let organization = self
            .organization_repo
            .find_by_id(conn, user.organization_id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Organization", user.organization_id))?;
        let roles = self.repo.find_roles(conn, id).await?;
        Ok(UserDetails::new(user, organization, roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::{OrganizationInput, OrganizationService};
    use crate::role::{RoleInput, RoleService};

    struct Fixture {
        users: UserService,
        roles: RoleService,
        acme_id: i64,
        globex_id: i64,
    }

    async fn fixture() -> Fixture {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        let orgs = OrganizationService::new(db.clone());
        let acme_id = orgs.create(&OrganizationInput::new("Acme")).await.unwrap().id;
        let globex_id = orgs.create(&OrganizationInput::new("Globex")).await.unwrap().id;

        Fixture {
            users: UserService::new(db.clone(), PasswordService::for_testing()),
            roles: RoleService::new(db),
            acme_id,
            globex_id,
        }
    }

    #[tokio::test]
    async fn test_create_user_in_organization() {
        let f = fixture().await;
        let user = f
            .users
            .create(&UserCreate::new("a@b.com", f.acme_id).with_name("Ada", "Lovelace"))
            .await
            .unwrap();

        let details = f.users.get_details(user.id).await.unwrap();
        assert_eq!(details.organization.name, "Acme");
        assert!(details.roles.is_empty());
        assert_eq!(details.first_name.as_deref(), Some("Ada"));
        assert!(details.is_active);
        assert!(!details.is_admin);
    }

    #[tokio::test]
    async fn test_create_rejections() {
        let f = fixture().await;
        f.users.create(&UserCreate::new("a@b.com", f.acme_id)).await.unwrap();

        assert!(matches!(
            f.users.create(&UserCreate::new("a@b.com", f.globex_id)).await,
            Err(PlatformError::Duplicate { .. })
        ));
        assert!(matches!(
            f.users.create(&UserCreate::new("c@d.com", 999)).await,
            Err(PlatformError::NotFound { .. })
        ));
        assert!(matches!(
            f.users.create(&UserCreate::new("not-an-email", f.acme_id)).await,
            Err(PlatformError::Validation { .. })
        ));
        assert_eq!(f.users.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_but_keeps_email_and_password() {
        let f = fixture().await;
        let user = f
            .users
            .create(&UserCreate::new("a@b.com", f.acme_id).with_password("initial-secret"))
            .await
            .unwrap();

        let mut update = UserUpdate::new(f.globex_id);
        update.first_name = Some("Grace".to_string());
        update.is_admin = true;
        let details = f.users.update(user.id, &update).await.unwrap();

        assert_eq!(details.email, "a@b.com");
        assert_eq!(details.organization.name, "Globex");
        assert!(details.is_admin);
        assert!(f.users.verify_password(user.id, "initial-secret").await.unwrap());

        update.password = Some("rotated-secret".to_string());
        f.users.update(user.id, &update).await.unwrap();
        assert!(f.users.verify_password(user.id, "rotated-secret").await.unwrap());
        assert!(!f.users.verify_password(user.id, "initial-secret").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_user_or_organization() {
        let f = fixture().await;
        let user = f.users.create(&UserCreate::new("a@b.com", f.acme_id)).await.unwrap();

        assert!(matches!(
            f.users.update(999, &UserUpdate::new(f.acme_id)).await,
            Err(PlatformError::NotFound { .. })
        ));
        let err = f.users.update(user.id, &UserUpdate::new(999)).await.unwrap_err();
        assert_eq!(err.to_string(), "Organization 999 does not exist");
        assert_eq!(f.users.get_details(user.id).await.unwrap().organization.id, f.acme_id);
    }

    #[tokio::test]
    async fn test_role_assignment() {
        let f = fixture().await;
        let user = f.users.create(&UserCreate::new("a@b.com", f.acme_id)).await.unwrap();
        let admin = f.roles.create(&RoleInput::new("admin")).await.unwrap();
        let viewer = f.roles.create(&RoleInput::new("viewer")).await.unwrap();

        let err = f.users.add_roles(user.id, &[admin.id, 4242]).await.unwrap_err();
        assert_eq!(err.to_string(), "Role 4242 does not exist");
        assert!(f.users.get_details(user.id).await.unwrap().roles.is_empty());

        let details = f.users.add_roles(user.id, &[admin.id, viewer.id, admin.id]).await.unwrap();
        assert_eq!(details.role_ids(), vec![admin.id, viewer.id]);

        let details = f.users.remove_roles(user.id, &[admin.id]).await.unwrap();
        assert_eq!(details.role_ids(), vec![viewer.id]);
        let details = f.users.remove_roles(user.id, &[admin.id]).await.unwrap();
        assert_eq!(details.role_ids(), vec![viewer.id]);

        f.roles.delete(viewer.id).await.unwrap();
        assert!(f.users.get_details(user.id).await.unwrap().roles.is_empty());
    }

    #[tokio::test]
    async fn test_user_without_password_never_verifies() {
        let f = fixture().await;
        let user = f.users.create(&UserCreate::new("a@b.com", f.acme_id)).await.unwrap();
        assert!(!f.users.verify_password(user.id, "anything").await.unwrap());
        assert!(f.users.get_by_id(user.id).await.unwrap().is_some());
        f.users.delete(user.id).await.unwrap();
        assert!(f.users.get_by_id(user.id).await.unwrap().is_none());
    }
}
