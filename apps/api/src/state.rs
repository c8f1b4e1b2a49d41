use std::sync::Arc;

use crate::llm_client::LanguageModel;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both handles are trait objects built once at startup; they hold no
/// per-request data, so concurrent requests share them freely.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LanguageModel>,
    pub store: Arc<dyn RecordStore>,
}
