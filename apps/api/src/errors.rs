use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::funnel::submission::ValidationError;
use crate::llm_client::LlmError;

/// Shown to the caller in place of the preview when the LLM stages fail.
pub const FALLBACK_PREVIEW: &str =
    "We encountered an issue generating your personalized AI stack. Please try again later.";

/// The LLM-backed stage that was running when the pipeline aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Relevance,
    Recommendation,
    Qualification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Relevance => "relevance",
            Stage::Recommendation => "recommendation",
            Stage::Qualification => "qualification",
        };
        f.write_str(name)
    }
}

/// Request-level outcomes that replace the success response.
/// Implements `IntoResponse` so the submit handler can return `Result<T, FunnelError>`.
///
/// Store failures are deliberately absent: they never reach the caller.
#[derive(Debug, Error)]
pub enum FunnelError {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Query out of scope: {reasoning}")]
    RelevanceRejected {
        primary_goal: String,
        reasoning: String,
    },

    #[error("LLM processing failed at {stage} stage: {source}")]
    Pipeline {
        stage: Stage,
        #[source]
        source: LlmError,
    },
}

impl FunnelError {
    pub fn pipeline(stage: Stage) -> impl FnOnce(LlmError) -> FunnelError {
        move |source| FunnelError::Pipeline { stage, source }
    }
}

impl IntoResponse for FunnelError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            FunnelError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": e.to_string(),
                    "message": "Input validation failed"
                }),
            ),
            FunnelError::RelevanceRejected {
                primary_goal,
                reasoning,
            } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Query out of scope",
                    "message": format!(
                        "Your request about '{primary_goal}' appears to be outside the scope \
                        of AI tool recommendations. {reasoning}"
                    )
                }),
            ),
            FunnelError::Pipeline { stage, source } => {
                tracing::error!("LLM error at {stage} stage: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "LLM_PROCESSING_FAILED",
                        "message": "An error occurred during LLM processing. Please try again.",
                        "preview_summary": FALLBACK_PREVIEW,
                        "b2b_qualified": false
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
