pub mod health;

use axum::{routing::get, Router};

use crate::community::handlers as community;
use crate::state::AppState;
use crate::synthesis::handlers as synthesis;
use crate::votes::handlers as votes;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Synthesis trigger (cron)
        .route(
            "/api/cron/generate-posts",
            get(synthesis::handle_generate_posts),
        )
        // Manual votes
        .route(
            "/api/posts/:post_id/vote",
            get(votes::handle_get_vote).post(votes::handle_cast_vote),
        )
        // Community
        .route("/api/regulars", get(community::handle_regulars))
        .route("/api/stats", get(community::handle_stats))
        .with_state(state)
}
