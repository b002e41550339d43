//! Role Service

use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::right::repository::RightRepository;
use crate::role::entity::{Role, RoleDetails, RoleInput};
use crate::role::repository::RoleRepository;
use crate::shared::database::Database;
use crate::shared::error::{PlatformError, Result};
use crate::shared::validation::{unique_ids, validate_name};

#[derive(Debug, Clone)]
pub struct RoleService {
    db: Database,
    repo: RoleRepository,
    right_repo: RightRepository,
}

impl RoleService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            repo: RoleRepository::new(),
            right_repo: RightRepository::new(),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Role>> {
        let mut tx = self.db.begin_read().await?;
        let roles = self.repo.find_all(&mut tx).await?;
        tx.commit().await?;
        Ok(roles)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Role>> {
        let mut tx = self.db.begin_read().await?;
        let role = self.repo.find_by_id(&mut tx, id).await?;
        tx.commit().await?;
        Ok(role)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Role>> {
        let mut tx = self.db.begin_read().await?;
        let role = self.repo.find_by_name(&mut tx, name).await?;
        tx.commit().await?;
        Ok(role)
    }

    pub async fn get_details(&self, id: i64) -> Result<RoleDetails> {
        let mut tx = self.db.begin_read().await?;
        let details = self.load_details(&mut tx, id).await?;
        tx.commit().await?;
        Ok(details)
    }

    pub async fn create(&self, input: &RoleInput) -> Result<RoleDetails> {
        validate_name("Role", &input.name)?;

        let mut tx = self.db.begin().await?;
        if self.repo.find_by_name(&mut tx, &input.name).await?.is_some() {
            debug!(name = %input.name, "Role name already taken");
            return Err(PlatformError::duplicate("Role", "name", &input.name));
        }

        let role = self
            .repo
            .insert(&mut tx, &input.name, input.description.as_deref(), ac_common::now_millis())
            .await?;
        tx.commit().await?;

        info!(role_id = role.id, name = %role.name, "Role created");
        Ok(RoleDetails::new(role, Vec::new()))
    }

    pub async fn update(&self, id: i64, input: &RoleInput) -> Result<RoleDetails> {
        validate_name("Role", &input.name)?;

        let mut tx = self.db.begin().await?;
        if !self.repo.exists(&mut tx, id).await? {
            return Err(PlatformError::not_found("Role", id));
        }
        if let Some(other) = self.repo.find_by_name(&mut tx, &input.name).await? {
            if other.id != id {
                debug!(role_id = id, name = %input.name, "Role name held by another role");
                return Err(PlatformError::duplicate("Role", "name", &input.name));
            }
        }

        self.repo
            .update(&mut tx, id, &input.name, input.description.as_deref(), ac_common::now_millis())
            .await?;
        let details = self.load_details(&mut tx, id).await?;
        tx.commit().await?;

        info!(role_id = id, "Role updated");
        Ok(details)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.db.begin().await?;
        if !self.repo.delete(&mut tx, id).await? {
            return Err(PlatformError::not_found("Role", id));
        }
        tx.commit().await?;

        info!(role_id = id, "Role deleted");
        Ok(())
    }

    /// Attach rights to a role.
    ///
    /// Every id is resolved before anything is written, so one unknown id
    /// leaves the role unchanged. Already-attached rights are skipped.
    pub async fn add_rights(&self, role_id: i64, right_ids: &[i64]) -> Result<RoleDetails> {
        let right_ids = unique_ids(right_ids);

        let mut tx = self.db.begin().await?;
        self.check_links(&mut tx, role_id, &right_ids).await?;

        let attached = self
            .repo
            .attach_rights(&mut tx, role_id, &right_ids, ac_common::now_millis())
            .await?;
        let details = self.load_details(&mut tx, role_id).await?;
        tx.commit().await?;

        info!(role_id, attached, "Rights attached to role");
        Ok(details)
    }

    /// Detach rights from a role. Rights that were not attached are ignored.
    pub async fn remove_rights(&self, role_id: i64, right_ids: &[i64]) -> Result<RoleDetails> {
        let right_ids = unique_ids(right_ids);

        let mut tx = self.db.begin().await?;
        self.check_links(&mut tx, role_id, &right_ids).await?;

        let detached = self.repo.detach_rights(&mut tx, role_id, &right_ids).await?;
        let details = self.load_details(&mut tx, role_id).await?;
        tx.commit().await?;

        info!(role_id, detached, "Rights detached from role");
        Ok(details)
    }

    async fn check_links(&self, conn: &mut SqliteConnection, role_id: i64, right_ids: &[i64]) -> Result<()> {
        if !self.repo.exists(conn, role_id).await? {
            return Err(PlatformError::not_found("Role", role_id));
        }
        for &right_id in right_ids {
            if !self.right_repo.exists(conn, right_id).await? {
                debug!(role_id, right_id, "Unknown right in link request");
                return Err(PlatformError::not_found("Right", right_id));
            }
        }
        Ok(())
    }

    async fn load_details(&self, conn: &mut SqliteConnection, id: i64) -> Result<RoleDetails> {
        let role = self
            .repo
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Role", id))?;
        let rights = self.repo.find_rights(conn, id).await?;
        Ok(RoleDetails::new(role, rights))
    }
}
