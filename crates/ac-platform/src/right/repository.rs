//! Right Repository

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::right::entity::Right;
use crate::shared::error::Result;

const COLUMNS: &str = "id, name, description, created_at, modified_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct RightRepository;

impl RightRepository {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn parse_row(row: &SqliteRow) -> Right {
        Right {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: ac_common::from_millis(row.get("created_at")),
            modified_at: ac_common::from_millis_opt(row.get("modified_at")),
        }
    }

    pub async fn find_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Right>> {
        let query = format!("SELECT {} FROM rights ORDER BY id", COLUMNS);
        let rows = sqlx::query(&query).fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(Self::parse_row).collect())
    }

    pub async fn find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> Result<Option<Right>> {
        let query = format!("SELECT {} FROM rights WHERE id = ?", COLUMNS);
        let row = sqlx::query(&query).bind(id).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn find_by_name(&self, conn: &mut SqliteConnection, name: &str) -> Result<Option<Right>> {
        let query = format!("SELECT {} FROM rights WHERE name = ?", COLUMNS);
        let row = sqlx::query(&query).bind(name).fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(Self::parse_row))
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM rights WHERE id = ?")
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
    ) -> Result<Right> {
        let id = sqlx::query("INSERT INTO rights (name, description, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(description)
            .bind(created_at.timestamp_millis())
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        Ok(Right {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at,
            modified_at: None,
        })
    }

    /// Returns false when no row matched.
    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        name: &str,
        description: Option<&str>,
        modified_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE rights SET name = ?, description = ?, modified_at = ? WHERE id = ?")
            .bind(name)
            .bind(description)
            .bind(modified_at.timestamp_millis())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes the right; its role links go with it.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rights WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::Database;

    async fn setup() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = setup().await;
        let repo = RightRepository::new();
        let mut tx = db.begin().await.unwrap();

        let now = ac_common::now_millis();
        let right = repo.insert(&mut tx, "read", Some("Read access"), now).await.unwrap();
        assert!(right.modified_at.is_none());

        let found = repo.find_by_id(&mut tx, right.id).await.unwrap().unwrap();
        assert_eq!(found, right);
        assert_eq!(repo.find_by_name(&mut tx, "read").await.unwrap(), Some(right));
        assert!(repo.find_by_name(&mut tx, "write").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_row() {
        let db = setup().await;
        let repo = RightRepository::new();
        let mut tx = db.begin().await.unwrap();

        let now = ac_common::now_millis();
        assert!(!repo.update(&mut tx, 99, "x", None, now).await.unwrap());
        assert!(!repo.delete(&mut tx, 99).await.unwrap());
        assert!(!repo.exists(&mut tx, 99).await.unwrap());
    }
}
