use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::debug;

use crate::engine::evaluate;
use crate::errors::AppError;
use crate::models::profile::CreditProfile;
use crate::models::report::CreditHealthReport;
use crate::state::AppState;

/// GET /profiles
pub async fn handle_list_profiles(State(state): State<AppState>) -> Json<Vec<CreditProfile>> {
    Json(state.profiles.all().to_vec())
}

/// GET /profiles/:id/report
pub async fn handle_profile_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CreditHealthReport>, AppError> {
    let profile = state
        .profiles
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(evaluate(profile)))
}

/// POST /evaluate
///
/// Scores an ad-hoc profile supplied in the body. Shape errors surface as 400s
/// before the engine runs; numeric ranges are not checked.
pub async fn handle_evaluate(
    payload: Result<Json<CreditProfile>, JsonRejection>,
) -> Result<Json<CreditHealthReport>, AppError> {
    let Json(profile) = payload?;
    debug!(profile_id = %profile.id, "evaluating ad-hoc profile");
    Ok(Json(evaluate(&profile)))
}
