//! Recommendation Generator: produces the personalized AI tool stack write-up.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::funnel::prompts::{render, RECOMMENDATION_PROMPT_TEMPLATE, RECOMMENDATION_SYSTEM};
use crate::funnel::submission::QuizSubmission;
use crate::llm_client::prompts::with_json_only;
use crate::llm_client::{call_json, LanguageModel, LlmError};

/// The full generated content. Markdown inside the summary is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub ai_stack_summary: String,
}

pub async fn generate_recommendation(
    submission: &QuizSubmission,
    llm: &dyn LanguageModel,
) -> Result<RecommendationResult, LlmError> {
    let prompt = render(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("primary_goal", submission.primary_goal.as_str()),
            ("tech_skill", submission.tech_skill.as_str()),
            ("tools", submission.tools.as_str()),
        ],
    );

    let result: RecommendationResult =
        call_json(llm, &prompt, &with_json_only(RECOMMENDATION_SYSTEM)).await?;

    info!(
        "Generated AI stack summary ({} chars)",
        result.ai_stack_summary.chars().count()
    );
    Ok(result)
}
