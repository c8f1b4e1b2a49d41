use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::funnel::submission::QuizSubmission;

/// One completed funnel run. Written once, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub user_id: Uuid,
    pub primary_goal: String,
    pub tech_skill: String,
    pub tools: String,
    pub budget: String,
    /// Full summary exactly as generated (escape sequences untouched).
    pub ai_stack_summary: String,
    /// Truncated preview with newlines normalized.
    pub preview_summary: String,
    pub b2b_qualified: bool,
    pub created_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Stamps a fresh random identifier and the current UTC time.
    pub fn new(
        submission: &QuizSubmission,
        ai_stack_summary: String,
        preview_summary: String,
        b2b_qualified: bool,
    ) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            primary_goal: submission.primary_goal.clone(),
            tech_skill: submission.tech_skill.clone(),
            tools: submission.tools.clone(),
            budget: submission.budget.clone(),
            ai_stack_summary,
            preview_summary,
            b2b_qualified,
            created_at: Utc::now(),
        }
    }
}
