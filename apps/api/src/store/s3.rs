use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
use uuid::Uuid;

use crate::models::quiz_result::StoredRecord;
use crate::store::{RecordStore, StoreError};

const KEY_PREFIX: &str = "quiz-results";

/// Stores each record as a JSON object keyed by its `user_id`.
#[derive(Clone)]
pub struct S3RecordStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3RecordStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

/// `quiz-results/<user_id>.json`
pub fn object_key(user_id: Uuid) -> String {
    format!("{KEY_PREFIX}/{user_id}.json")
}

#[async_trait]
impl RecordStore for S3RecordStore {
    async fn put(&self, record: &StoredRecord) -> Result<(), StoreError> {
        let key = object_key(record.user_id);
        let body = serde_json::to_vec(record)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::S3(DisplayErrorContext(&e).to_string()))?;

        info!("Saved quiz result to s3://{}/{key}", self.bucket);
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "s3"
    }
}
