//! Axum route handlers for the quiz funnel.

use axum::{body::Bytes, extract::State, Json};
use tracing::warn;

use crate::errors::FunnelError;
use crate::funnel::pipeline::{run_funnel, FunnelResponse};
use crate::funnel::submission::QuizSubmission;
use crate::state::AppState;

/// POST /submit
///
/// Takes the raw body so that malformed JSON is reported in the same shape as
/// any other validation failure. Validation happens before any LLM call.
pub async fn handle_submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FunnelResponse>, FunnelError> {
    let submission = QuizSubmission::from_body(&body).map_err(|e| {
        warn!("Rejected quiz submission: {e}");
        FunnelError::Validation(e)
    })?;

    let response = run_funnel(&submission, state.llm.as_ref(), state.store.clone()).await?;

    Ok(Json(response))
}
