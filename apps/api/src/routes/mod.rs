pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::funnel::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Quiz intake (path kept from the original deployment)
        .route("/submit", post(handlers::handle_submit))
        .with_state(state)
}
