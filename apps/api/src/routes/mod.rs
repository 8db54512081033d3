pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisor::handlers as advisor_handlers;
use crate::profiles::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles & reports
        .route("/profiles", get(profile_handlers::handle_list_profiles))
        .route(
            "/profiles/:id/report",
            get(profile_handlers::handle_profile_report),
        )
        .route("/evaluate", post(profile_handlers::handle_evaluate))
        // Advisor
        .route("/chat", post(advisor_handlers::handle_chat))
        .with_state(state)
}
