pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::content::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content generation API
        .route("/api/v1/generate", post(handlers::handle_generate))
        .route("/api/v1/ideas", post(handlers::handle_ideas))
        .route("/api/v1/captions", post(handlers::handle_caption))
        .with_state(state)
}
