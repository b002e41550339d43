//! User Repository
//!
//! Owns the `user_roles` link table.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::role::entity::Role;
use crate::role::repository::RoleRepository;
use crate::shared::error::Result;
use crate::user::entity::User;

const COLUMNS: &str =
    "id, email, first_name, last_name, password_hash, is_active, is_admin, organization_id";

#[derive(Debug, Default, Clone, Copy)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(row: &SqliteRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            password_hash: row.get("password_hash"),
            is_active: row.get("is_active"),
            is_admin: row.get("is_admin"),
            organization_id: row.get("organization_id"),
        }
    }

    pub async fn find_all(&self, conn: &mut SqliteConnection) -> Result<Vec<User>> {
        let query = format!("SELECT {} FROM users ORDER BY id", COLUMNS);
        let rows = sqlx::query(&query).fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(Self::parse_row).collect())
    }

    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = ?", COLUMNS);
        let row = sqlx::query(&query).bind(id).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn find_by_email(&self, conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = ?", COLUMNS);
        let row = sqlx::query(&query).bind(email).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn find_by_organization(
        &self,
        conn: &mut SqliteConnection,
        organization_id: i64,
    ) -> Result<Vec<User>> {
        let query = format!("SELECT {} FROM users WHERE organization_id = ? ORDER BY id", COLUMNS);
        let rows = sqlx::query(&query)
            .bind(organization_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.iter().map(Self::parse_row).collect())
    }

    pub async fn count_by_organization(&self, conn: &mut SqliteConnection, organization_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users WHERE organization_id = ?")
            .bind(organization_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.get("n"))
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.is_some())
    }

    /// Insert `user`, ignoring its id. Returns the assigned id.
    pub async fn insert(&self, conn: &mut SqliteConnection, user: &User) -> Result<i64> {
        let id = sqlx::query(
            "INSERT INTO users (email, first_name, last_name, password_hash, is_active, is_admin, organization_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.organization_id)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    /// Overwrite every column except the email.
    pub async fn update(&self, conn: &mut SqliteConnection, user: &User) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET first_name = ?, last_name = ?, password_hash = ?, is_active = ?, \
             is_admin = ?, organization_id = ? WHERE id = ?",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.organization_id)
        .bind(user.id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes the user together with its role links.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Roles held by the user, oldest assignment first.
    pub async fn find_roles(&self, conn: &mut SqliteConnection, user_id: i64) -> Result<Vec<Role>> {
        let rows = sqlx::query(
            "SELECT r.id, r.name, r.description, r.created_at, r.modified_at \
             FROM roles r JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = ? ORDER BY ur.id",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.iter().map(RoleRepository::parse_row).collect())
    }

    /// Assign roles. Existing assignments are left untouched.
    pub async fn attach_roles(
        &self,
        conn: &mut SqliteConnection,
        user_id: i64,
        role_ids: &[i64],
        created_at: DateTime<Utc>,
    ) -> Result<u64> {
        let mut attached = 0;
        for &role_id in role_ids {
            attached += sqlx::query(
                "INSERT OR IGNORE INTO user_roles (user_id, role_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(user_id)
            .bind(role_id)
            .bind(created_at.timestamp_millis())
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(attached)
    }

    /// Revoke roles. Ids that are not assigned are skipped.
    pub async fn detach_roles(&self, conn: &mut SqliteConnection, user_id: i64, role_ids: &[i64]) -> Result<u64> {
        let mut detached = 0;
        for &role_id in role_ids {
            detached += sqlx::query("DELETE FROM user_roles WHERE user_id = ? AND role_id = ?")
                .bind(user_id)
                .bind(role_id)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }
        Ok(detached)
    }
}
