//! Record Store: best-effort persistence of completed funnel runs.
//!
//! Writes run in a detached task after the response is built. A failed write
//! is logged there and never changes the response.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::quiz_result::StoredRecord;

pub mod postgres;
pub mod s3;

pub use postgres::PgRecordStore;
pub use s3::S3RecordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only key-value persistence, keyed by `StoredRecord::user_id`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, record: &StoredRecord) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn describe(&self) -> &'static str;
}

/// Used when no destination is configured. Every write is skipped.
pub struct NoopRecordStore;

#[async_trait]
impl RecordStore for NoopRecordStore {
    async fn put(&self, record: &StoredRecord) -> Result<(), StoreError> {
        debug!("Record store disabled, skipping write for user_id {}", record.user_id);
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "disabled"
    }
}
