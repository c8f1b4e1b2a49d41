// Quiz intake funnel: validation, relevance gate, recommendation, lead qualification.
// All LLM calls go through llm_client; stages only see the `LanguageModel` trait.

pub mod handlers;
pub mod pipeline;
pub mod preview;
pub mod prompts;
pub mod qualification;
pub mod recommendation;
pub mod relevance;
pub mod submission;
