// Cross-cutting prompt fragments shared by every funnel stage.
// Stage-specific prompts live in funnel/prompts.rs.

/// Appended to every stage's system prompt. JSON mode requires the word "JSON"
/// to appear in the conversation, and this keeps the model from adding prose.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences around the JSON.";

/// Builds a stage system prompt with the JSON-only fragment appended.
pub fn with_json_only(system: &str) -> String {
    format!("{system} {JSON_ONLY_SYSTEM}")
}
