//! Epidemiological records, exposed as a read-only listing.

pub mod api;
pub mod entity;
pub mod repository;
pub mod service;

pub use api::{records_router, RecordsState};
pub use entity::{NewRecord, Record};
pub use repository::RecordRepository;
pub use service::RecordService;
