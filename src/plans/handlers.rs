use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    access::require_premium,
    auth::AuthUser,
    plans::{
        catalog::{DietPlan, DietType},
        dto::PlanSummary,
    },
    profile::services::targets_for,
    state::AppState,
};

const FULL_PLAN_FEATURE: &str = "Full diet plan";

pub fn plans_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/plans/recommended", get(get_recommended_plan))
        .route("/plans/:diet_type/:calories", get(get_plan))
}

#[instrument(skip(state))]
pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<PlanSummary>> {
    Json(state.catalog.summaries())
}

/// Full, micronutrient-enriched recommended plan.
#[instrument(skip(state))]
pub async fn get_recommended_plan(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> Result<Json<DietPlan>, (StatusCode, String)> {
    require_premium(AuthUser::tier_of(user.as_ref()), FULL_PLAN_FEATURE)?;

    let id = AuthUser::profile_id(user.as_ref());
    let (profile, targets) = targets_for(state.profiles.as_ref(), &id)
        .await
        .map_err(|e| {
            error!(error = %e, profile_id = %id, "load profile failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or((StatusCode::CONFLICT, "Profile incomplete".to_string()))?;

    let plan = state
        .catalog
        .select_recommended_plan(targets.tdee, profile.diet_type.unwrap_or_default())
        .ok_or((StatusCode::NOT_FOUND, "No matching plan found".to_string()))?;

    Ok(Json(plan.enriched(&state.micros)))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path((diet_type, calories)): Path<(DietType, i64)>,
) -> Result<Json<DietPlan>, (StatusCode, String)> {
    require_premium(AuthUser::tier_of(user.as_ref()), FULL_PLAN_FEATURE)?;

    let plan = state
        .catalog
        .find(diet_type, calories)
        .ok_or((StatusCode::NOT_FOUND, "Plan not found".to_string()))?;
    Ok(Json(plan.enriched(&state.micros)))
}
