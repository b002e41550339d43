//! Record Service

use crate::record::entity::{NewRecord, Record};
use crate::record::repository::RecordRepository;
use crate::shared::database::Database;
use crate::shared::error::Result;

#[derive(Debug, Clone)]
pub struct RecordService {
    db: Database,
    repo: RecordRepository,
}

impl RecordService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            repo: RecordRepository::new(),
        }
    }

    pub async fn get_all_records(&self) -> Result<Vec<Record>> {
        let mut tx = self.db.begin_read().await?;
        let records = self.repo.find_all(&mut tx).await?;
        tx.commit().await?;
        Ok(records)
    }

    /// Bulk load, all or nothing. Not exposed over HTTP.
    pub async fn import(&self, records: &[NewRecord]) -> Result<usize> {
        let mut tx = self.db.begin().await?;
        for record in records {
            self.repo.insert(&mut tx, record).await?;
        }
        tx.commit().await?;
        Ok(records.len())
    }

    pub async fn count(&self) -> Result<i64> {
        let mut tx = self.db.begin_read().await?;
        let count = self.repo.count(&mut tx).await?;
        tx.commit().await?;
        Ok(count)
    }
}
