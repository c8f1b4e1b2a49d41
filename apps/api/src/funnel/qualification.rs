//! Lead Qualifier: LLM judgment on B2B intent, narrowed by a budget rule.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::funnel::prompts::{render, QUALIFICATION_PROMPT_TEMPLATE, QUALIFICATION_SYSTEM};
use crate::funnel::submission::QuizSubmission;
use crate::llm_client::prompts::with_json_only;
use crate::llm_client::{call_json, LanguageModel, LlmError};

/// The two highest budget brackets offered by the quiz. Only these keep a qualified lead.
pub const QUALIFYING_BUDGETS: &[&str] = &["$2000-5000", "$5000+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadQualification {
    pub b2b_qualified: bool,
}

impl LeadQualification {
    /// Drops a qualified lead whose budget sits below the qualifying brackets.
    /// Never promotes a lead the model rejected.
    pub fn apply_budget_rule(&mut self, budget: &str) {
        if self.b2b_qualified && !QUALIFYING_BUDGETS.contains(&budget) {
            info!("Budget '{budget}' is below the qualifying brackets, lead downgraded");
            self.b2b_qualified = false;
        }
    }
}

/// Classifies the submission as a B2B prospect, then applies the budget rule.
pub async fn qualify_lead(
    submission: &QuizSubmission,
    llm: &dyn LanguageModel,
) -> Result<LeadQualification, LlmError> {
    let prompt = render(
        QUALIFICATION_PROMPT_TEMPLATE,
        &[("primary_goal", submission.primary_goal.as_str())],
    );

    let mut qualification: LeadQualification =
        call_json(llm, &prompt, &with_json_only(QUALIFICATION_SYSTEM)).await?;
    info!("Qualifier verdict: b2b_qualified={}", qualification.b2b_qualified);

    qualification.apply_budget_rule(&submission.budget);
    Ok(qualification)
}
