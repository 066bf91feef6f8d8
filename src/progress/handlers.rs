use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, instrument};

use crate::{
    auth::AuthUser,
    profile::compute_targets,
    progress::{consumed_protein, progress_percent, ProgressRequest, ProgressResponse},
    state::AppState,
};

pub fn progress_routes() -> Router<AppState> {
    Router::new().route("/progress", post(post_progress))
}

#[instrument(skip(state, req))]
pub async fn post_progress(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<ProgressResponse>, (StatusCode, String)> {
    let id = AuthUser::profile_id(user.as_ref());
    let profile = state.profiles.get(&id).await.map_err(|e| {
        error!(error = %e, profile_id = %id, "load profile failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let target_protein = profile
        .as_ref()
        .and_then(compute_targets)
        .map(|t| t.protein_g)
        .unwrap_or(0);
    let consumed = consumed_protein(&req.items, &state.foods);

    Ok(Json(ProgressResponse {
        consumed_protein: consumed,
        target_protein,
        percent: progress_percent(consumed, target_protein),
    }))
}
