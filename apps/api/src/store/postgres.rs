use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::quiz_result::StoredRecord;
use crate::store::{RecordStore, StoreError};

const INSERT_QUIZ_RESULT: &str = r#"
    INSERT INTO quiz_results
        (user_id, primary_goal, tech_skill, tools, budget,
         ai_stack_summary, preview_summary, b2b_qualified, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
"#;

/// Writes each record as one row of `quiz_results`.
/// CRITICAL: append-only. Never UPDATE or DELETE existing rows.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn put(&self, record: &StoredRecord) -> Result<(), StoreError> {
        sqlx::query(INSERT_QUIZ_RESULT)
            .bind(record.user_id)
            .bind(&record.primary_goal)
            .bind(&record.tech_skill)
            .bind(&record.tools)
            .bind(&record.budget)
            .bind(&record.ai_stack_summary)
            .bind(&record.preview_summary)
            .bind(record.b2b_qualified)
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;

        info!("Saved quiz result to PostgreSQL for user_id: {}", record.user_id);
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_binds_every_record_field() {
        let placeholders = (1..=9).filter(|i| INSERT_QUIZ_RESULT.contains(&format!("${i}"))).count();
        assert_eq!(placeholders, 9);
        assert!(!INSERT_QUIZ_RESULT.contains("$10"));
        assert!(!INSERT_QUIZ_RESULT.to_uppercase().contains("ON CONFLICT"));
    }
}
