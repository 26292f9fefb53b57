pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/candidates/", post(handlers::handle_create_candidate))
        .route("/candidates/:job_id", get(handlers::handle_list_candidates))
        .route(
            "/candidates/:job_id/match",
            get(handlers::handle_match_candidates),
        )
        .with_state(state)
}
