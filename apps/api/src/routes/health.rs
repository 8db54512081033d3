use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::llm_client;
use crate::state::AppState;

/// GET /health
/// Returns service status, version, and which advisor backend is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "credit-coach-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "model": llm_client::MODEL,
        "advisorBackend": state.advisor.backend(),
        "llmEnabled": state.config.llm_enabled(),
        "profilesLoaded": state.profiles.all().len(),
        "activeConversations": state.conversations.active_count(),
    }))
}
