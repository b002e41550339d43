//! Record Repository

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::record::entity::{NewRecord, Record};
use crate::shared::error::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct RecordRepository;

impl RecordRepository {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(row: &SqliteRow) -> Record {
        Record {
            id: row.get("id"),
            date: row.get("date"),
            country: row.get("country"),
            cases: row.get("cases"),
            deaths: row.get("deaths"),
            recoveries: row.get("recoveries"),
        }
    }

    pub async fn find_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Record>> {
        let rows = sqlx::query(
            "SELECT id, date, country, cases, deaths, recoveries FROM records ORDER BY date, country, id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.iter().map(Self::parse_row).collect())
    }

    pub async fn count(&self, conn: &mut SqliteConnection) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM records")
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.get("n"))
    }

    pub async fn insert(&self, conn: &mut SqliteConnection, record: &NewRecord) -> Result<i64> {
        let id = sqlx::query(
            "INSERT INTO records (date, country, cases, deaths, recoveries) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.date)
        .bind(&record.country)
        .bind(record.cases)
        .bind(record.deaths)
        .bind(record.recoveries)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();
        Ok(id)
    }
}
