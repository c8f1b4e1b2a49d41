//! Funnel pipeline: runs the LLM stages in order and shapes the result.
//!
//! Flow: relevance gate → recommendation → lead qualification →
//!       preview + record → response, with the record written in a
//!       detached task that the response never waits on.
//!
//! Any LLM or parse failure aborts the whole run; nothing is retried and no
//! partial result is used. A rejected submission stops before generation and
//! is never persisted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{FunnelError, Stage};
use crate::funnel::preview::{truncate_preview, unescape_newlines};
use crate::funnel::qualification::{qualify_lead, LeadQualification};
use crate::funnel::recommendation::{generate_recommendation, RecommendationResult};
use crate::funnel::relevance::assess_relevance;
use crate::funnel::submission::QuizSubmission;
use crate::llm_client::LanguageModel;
use crate::models::quiz_result::StoredRecord;
use crate::store::RecordStore;

/// Success payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelResponse {
    /// Word-safe preview of the summary.
    pub message: String,
    pub user_id: Uuid,
    pub b2b_qualified: bool,
    pub stack_summary: String,
}

/// Runs every stage for one validated submission.
pub async fn run_funnel(
    submission: &QuizSubmission,
    llm: &dyn LanguageModel,
    store: Arc<dyn RecordStore>,
) -> Result<FunnelResponse, FunnelError> {
    // Stage 1: relevance gate
    let verdict = assess_relevance(submission, llm)
        .await
        .map_err(FunnelError::pipeline(Stage::Relevance))?;

    if !verdict.is_relevant {
        info!(
            "Submission rejected as out of scope: goal={:?}",
            submission.primary_goal
        );
        return Err(FunnelError::RelevanceRejected {
            primary_goal: submission.primary_goal.clone(),
            reasoning: verdict.reasoning,
        });
    }

    // Stage 2: recommendation
    let recommendation = generate_recommendation(submission, llm)
        .await
        .map_err(FunnelError::pipeline(Stage::Recommendation))?;

    // Stage 3: lead qualification (LLM verdict + budget rule)
    let qualification = qualify_lead(submission, llm)
        .await
        .map_err(FunnelError::pipeline(Stage::Qualification))?;

    // Stage 4: output assembly, then a fire-and-forget write
    let (record, response) = assemble_output(submission, recommendation, qualification);
    tokio::spawn(persist_best_effort(store, record));

    info!(
        "Funnel completed for user_id {} (b2b_qualified={})",
        response.user_id, response.b2b_qualified
    );
    Ok(response)
}

/// Builds the record to persist and the response to return.
///
/// The record keeps the summary exactly as generated; the response carries
/// newline-normalized copies of both texts.
pub fn assemble_output(
    submission: &QuizSubmission,
    recommendation: RecommendationResult,
    qualification: LeadQualification,
) -> (StoredRecord, FunnelResponse) {
    let summary = recommendation.ai_stack_summary;
    let preview_summary = unescape_newlines(truncate_preview(&summary));
    let stack_summary = unescape_newlines(&summary);

    let record = StoredRecord::new(
        submission,
        summary,
        preview_summary.clone(),
        qualification.b2b_qualified,
    );

    let response = FunnelResponse {
        message: preview_summary,
        user_id: record.user_id,
        b2b_qualified: record.b2b_qualified,
        stack_summary,
    };

    (record, response)
}

/// Writes the record and swallows any failure after logging it.
/// The returned `user_id` stays in the response even when the write fails.
async fn persist_best_effort(store: Arc<dyn RecordStore>, record: StoredRecord) {
    if let Err(e) = store.put(&record).await {
        let item = serde_json::to_string(&record).unwrap_or_default();
        error!(
            "Error saving quiz result via {} store: {e}. Item: {item}",
            store.describe()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::LlmError;
    use crate::store::testing::CapturingStore;
    use crate::store::StoreError;

    const SUMMARY: &str = "### Your Custom AI Tool Stack\\n\\n**1. ChatGPT** for drafting and \
        research\\n**2. Zapier** to automate hand-offs between your apps";

    fn submission(goal: &str, tools: &str, budget: &str) -> QuizSubmission {
        QuizSubmission {
            primary_goal: goal.to_string(),
            tech_skill: "Intermediate".to_string(),
            tools: tools.to_string(),
            budget: budget.to_string(),
        }
    }

    fn relevant() -> String {
        r#"{"is_relevant": true, "reasoning": "Clearly AI-related."}"#.to_string()
    }

    fn summary_answer() -> String {
        serde_json::json!({ "ai_stack_summary": SUMMARY }).to_string()
    }

    fn qualified(flag: bool) -> String {
        format!(r#"{{"b2b_qualified": {flag}}}"#)
    }

    #[tokio::test]
    async fn test_learning_goal_runs_every_stage() {
        let llm = ScriptedModel::new([relevant(), summary_answer(), qualified(false)]);
        let store = Arc::new(CapturingStore::default());

        let response = run_funnel(
            &submission("just trying to learn", "none", "$0-100"),
            &llm,
            store.clone(),
        )
        .await
        .unwrap();
        store.wait_for_write().await;

        assert_eq!(llm.call_count(), 3);
        assert!(!response.b2b_qualified);
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].user_id, response.user_id);
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        use crate::funnel::prompts::{QUALIFICATION_SYSTEM, RECOMMENDATION_SYSTEM, RELEVANCE_SYSTEM};

        let llm = ScriptedModel::new([relevant(), summary_answer(), qualified(true)]);
        let store = Arc::new(CapturingStore::default());
        run_funnel(&submission("automate invoicing", "Xero", "$5000+"), &llm, store)
            .await
            .unwrap();

        let systems = llm.systems();
        assert!(systems[0].starts_with(RELEVANCE_SYSTEM));
        assert!(systems[1].starts_with(RECOMMENDATION_SYSTEM));
        assert!(systems[2].starts_with(QUALIFICATION_SYSTEM));
    }

    #[tokio::test]
    async fn test_irrelevant_goal_short_circuits_without_persisting() {
        let llm = ScriptedModel::new([
            r#"{"is_relevant": false, "reasoning": "Snowboarding is unrelated to AI."}"#,
        ]);
        let store = Arc::new(CapturingStore::default());

        let err = run_funnel(
            &submission("I want to go snowboarding", "Snowboard, Goggles", "$0-100"),
            &llm,
            store.clone(),
        )
        .await
        .unwrap_err();

        match err {
            FunnelError::RelevanceRejected {
                primary_goal,
                reasoning,
            } => {
                assert_eq!(primary_goal, "I want to go snowboarding");
                assert_eq!(reasoning, "Snowboarding is unrelated to AI.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(llm.call_count(), 1);
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_saas_goal_with_top_budget_stays_qualified() {
        let llm = ScriptedModel::new([relevant(), summary_answer(), qualified(true)]);
        let store = Arc::new(CapturingStore::default());

        let response = run_funnel(
            &submission("build a SaaS for project management", "Jira, Slack", "$5000+"),
            &llm,
            store.clone(),
        )
        .await
        .unwrap();
        store.wait_for_write().await;

        assert!(response.b2b_qualified);
        assert!(store.records()[0].b2b_qualified);
    }

    #[tokio::test]
    async fn test_low_budget_downgrades_qualified_lead() {
        let llm = ScriptedModel::new([relevant(), summary_answer(), qualified(true)]);
        let store = Arc::new(CapturingStore::default());

        let response = run_funnel(
            &submission("build a SaaS for project management", "Jira", "$500-1000"),
            &llm,
            store,
        )
        .await
        .unwrap();

        assert!(!response.b2b_qualified);
    }

    #[tokio::test]
    async fn test_malformed_relevance_answer_is_a_pipeline_failure() {
        let llm = ScriptedModel::new(["not json at all"]);
        let store = Arc::new(CapturingStore::default());

        let err = run_funnel(&submission("learn", "none", "$0-100"), &llm, store.clone())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FunnelError::Pipeline {
                stage: Stage::Relevance,
                source: LlmError::Parse(_)
            }
        ));
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_qualifier_failure_discards_generated_summary() {
        let llm = ScriptedModel::new([relevant(), summary_answer()]);
        llm.push_error(LlmError::Api {
            status: 500,
            message: "upstream exploded".to_string(),
        });
        let store = Arc::new(CapturingStore::default());

        let err = run_funnel(&submission("learn", "none", "$0-100"), &llm, store.clone())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FunnelError::Pipeline {
                stage: Stage::Qualification,
                ..
            }
        ));
        // No retry: exactly one call per stage reached.
        assert_eq!(llm.call_count(), 3);
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_still_returns_success() {
        let llm = ScriptedModel::new([relevant(), summary_answer(), qualified(true)]);
        let store = Arc::new(CapturingStore::failing());

        let response = run_funnel(
            &submission("build a SaaS for project management", "Jira", "$2000-5000"),
            &llm,
            store.clone(),
        )
        .await
        .unwrap();
        store.wait_for_write().await;

        let attempted = store.records();
        assert_eq!(attempted.len(), 1);
        assert_eq!(response.user_id, attempted[0].user_id);
        assert!(response.b2b_qualified);
        assert_eq!(response.stack_summary, SUMMARY.replace("\\n", "\n"));
        assert_eq!(
            response.message,
            truncate_preview(SUMMARY).replace("\\n", "\n")
        );
    }

    /// Holds every write for half a minute before failing it.
    struct StalledStore;

    #[async_trait]
    impl RecordStore for StalledStore {
        async fn put(&self, _record: &StoredRecord) -> Result<(), StoreError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(StoreError::S3("connect timed out".to_string()))
        }

        fn describe(&self) -> &'static str {
            "stalled"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_does_not_delay_response() {
        let llm = ScriptedModel::new([relevant(), summary_answer(), qualified(true)]);
        let started = tokio::time::Instant::now();

        let response = run_funnel(
            &submission("integrate AI into my agency", "HubSpot", "$5000+"),
            &llm,
            Arc::new(StalledStore),
        )
        .await
        .unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(response.b2b_qualified);
    }

    #[test]
    fn test_record_keeps_raw_summary_while_response_is_normalized() {
        let (record, response) = assemble_output(
            &submission("learn", "none", "$0-100"),
            RecommendationResult {
                ai_stack_summary: SUMMARY.to_string(),
            },
            LeadQualification {
                b2b_qualified: false,
            },
        );

        assert_eq!(record.ai_stack_summary, SUMMARY);
        assert!(record.ai_stack_summary.contains("\\n"));
        assert!(!record.preview_summary.contains("\\n"));
        assert!(!response.stack_summary.contains("\\n"));
        assert_eq!(response.message, record.preview_summary);
        assert_eq!(response.user_id, record.user_id);
    }

    #[test]
    fn test_empty_summary_gives_empty_preview() {
        let (record, response) = assemble_output(
            &submission("learn", "none", "$0-100"),
            RecommendationResult {
                ai_stack_summary: String::new(),
            },
            LeadQualification {
                b2b_qualified: false,
            },
        );
        assert_eq!(record.preview_summary, "");
        assert_eq!(response.message, "");
    }
}
