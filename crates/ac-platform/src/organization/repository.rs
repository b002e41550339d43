//! Organization Repository

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::organization::entity::Organization;
use crate::shared::error::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct OrganizationRepository;

impl OrganizationRepository {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(row: &SqliteRow) -> Organization {
        Organization {
            id: row.get("id"),
            name: row.get("name"),
        }
    }

    pub async fn find_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Organization>> {
        let rows = sqlx::query("SELECT id, name FROM organizations ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.iter().map(Self::parse_row).collect())
    }

    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> Result<Option<Organization>> {
        let row = sqlx::query("SELECT id, name FROM organizations WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn find_by_name(&self, conn: &mut SqliteConnection, name: &str) -> Result<Option<Organization>> {
        let row = sqlx::query("SELECT id, name FROM organizations WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        Ok(self.find_by_id(conn, id).await?.is_some())
    }

    pub async fn insert(&self, conn: &mut SqliteConnection, name: &str) -> Result<Organization> {
        let id = sqlx::query("INSERT INTO organizations (name) VALUES (?)")
            .bind(name)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        Ok(Organization {
            id,
            name: name.to_string(),
        })
    }

    pub async fn update(&self, conn: &mut SqliteConnection, id: i64, name: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE organizations SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
