use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument, warn};

use crate::{
    auth::AuthUser,
    profile::{
        dto::{ProfileForm, ProfileResponse},
        services::{load_dashboard, save_profile_form, Dashboard, ProfileError},
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(put_profile))
        .route("/dashboard", get(get_dashboard))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let id = AuthUser::profile_id(user.as_ref());
    match state.profiles.get(&id).await {
        Ok(Some(p)) => Ok(Json(ProfileResponse::from(p))),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Profile not found".into())),
        Err(e) => {
            error!(error = %e, profile_id = %id, "load profile failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state, form))]
pub async fn put_profile(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Dashboard>, (StatusCode, String)> {
    let id = AuthUser::profile_id(user.as_ref());
    match save_profile_form(state.profiles.as_ref(), &state.catalog, &id, form).await {
        Ok(dashboard) => Ok(Json(dashboard)),
        Err(e @ ProfileError::InvalidMeasurement(_)) => {
            warn!(error = %e, profile_id = %id, "invalid profile form");
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(ProfileError::Store(e)) => {
            error!(error = %e, profile_id = %id, "save profile failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> Result<Json<Dashboard>, (StatusCode, String)> {
    let id = AuthUser::profile_id(user.as_ref());
    load_dashboard(state.profiles.as_ref(), &state.catalog, &id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, profile_id = %id, "dashboard failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}
