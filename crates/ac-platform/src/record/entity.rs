//! Record Entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Daily case counts for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Record {
    pub id: i64,
    pub date: NaiveDate,
    pub country: String,
    pub cases: i64,
    pub deaths: i64,
    pub recoveries: i64,
}

/// Row to insert. Only seeding and tests write records.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub country: String,
    pub cases: i64,
    pub deaths: i64,
    pub recoveries: i64,
}
