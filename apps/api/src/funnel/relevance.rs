//! Relevance Gate: filters out submissions whose goal has nothing to do with AI or technology.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::funnel::prompts::{render, RELEVANCE_PROMPT_TEMPLATE, RELEVANCE_SYSTEM};
use crate::funnel::submission::QuizSubmission;
use crate::llm_client::prompts::with_json_only;
use crate::llm_client::{call_json, LanguageModel, LlmError};

/// The gate's decision. Consumed immediately and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceVerdict {
    pub is_relevant: bool,
    pub reasoning: String,
}

/// Asks the model whether the goal and tools show interest in AI-related exploration.
///
/// A malformed answer is an error, never an implicit "irrelevant".
pub async fn assess_relevance(
    submission: &QuizSubmission,
    llm: &dyn LanguageModel,
) -> Result<RelevanceVerdict, LlmError> {
    let prompt = render(
        RELEVANCE_PROMPT_TEMPLATE,
        &[
            ("primary_goal", submission.primary_goal.as_str()),
            ("tools", submission.tools.as_str()),
        ],
    );

    let verdict: RelevanceVerdict =
        call_json(llm, &prompt, &with_json_only(RELEVANCE_SYSTEM)).await?;

    info!(
        "Relevance verdict: is_relevant={} ({})",
        verdict.is_relevant, verdict.reasoning
    );
    Ok(verdict)
}
