//! Role Repository
//!
//! Owns the `role_rights` link table.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::right::entity::Right;
use crate::right::repository::RightRepository;
use crate::role::entity::Role;
use crate::shared::error::Result;

const COLUMNS: &str = "id, name, description, created_at, modified_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct RoleRepository;

impl RoleRepository {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn parse_row(row: &SqliteRow) -> Role {
        Role {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: ac_common::from_millis(row.get("created_at")),
            modified_at: ac_common::from_millis_opt(row.get("modified_at")),
        }
    }

    pub async fn find_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Role>> {
        let query = format!("SELECT {} FROM roles ORDER BY id", COLUMNS);
        let rows = sqlx::query(&query).fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(Self::parse_row).collect())
    }

    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> Result<Option<Role>> {
        let query = format!("SELECT {} FROM roles WHERE id = ?", COLUMNS);
        let row = sqlx::query(&query).bind(id).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn find_by_name(&self, conn: &mut SqliteConnection, name: &str) -> Result<Option<Role>> {
        let query = format!("SELECT {} FROM roles WHERE name = ?", COLUMNS);
        let row = sqlx::query(&query).bind(name).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM roles WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.is_some())
    }

    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        description: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<Role> {
        let id = sqlx::query("INSERT INTO roles (name, description, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(description)
            .bind(created_at.timestamp_millis())
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        Ok(Role {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at,
            modified_at: None,
        })
    }

    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        name: &str,
        description: Option<&str>,
        modified_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE roles SET name = ?, description = ?, modified_at = ? WHERE id = ?")
            .bind(name)
            .bind(description)
            .bind(modified_at.timestamp_millis())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes the role together with its right and user links.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rights linked to the role, oldest link first.
    pub async fn find_rights(&self, conn: &mut SqliteConnection, role_id: i64) -> Result<Vec<Right>> {
        let rows = sqlx::query(
            "SELECT r.id, r.name, r.description, r.created_at, r.modified_at \
             FROM rights r JOIN role_rights rr ON rr.right_id = r.id \
             WHERE rr.role_id = ? ORDER BY rr.id",
        )
        .bind(role_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.iter().map(RightRepository::parse_row).collect())
    }

    /// Link rights to a role. Existing links are left untouched.
    pub async fn attach_rights(
        &self,
        conn: &mut SqliteConnection,
        role_id: i64,
        right_ids: &[i64],
        created_at: DateTime<Utc>,
    ) -> Result<u64> {
        let mut attached = 0;
        for &right_id in right_ids {
            attached += sqlx::query(
                "INSERT OR IGNORE INTO role_rights (role_id, right_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(role_id)
            .bind(right_id)
            .bind(created_at.timestamp_millis())
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(attached)
    }

    /// Unlink rights from a role. Ids that are not linked are skipped.
    pub async fn detach_rights(
        &self,
        conn: &mut SqliteConnection,
        role_id: i64,
        right_ids: &[i64],
    ) -> Result<u64> {
        let mut detached = 0;
        for &right_id in right_ids {
            detached += sqlx::query("DELETE FROM role_rights WHERE role_id = ? AND right_id = ?")
                .bind(role_id)
                .bind(right_id)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }
        Ok(detached)
    }
}
