use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    access::{Features, PlanTier},
    auth::jwt::AuthUser,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub plan: PlanTier,
    pub features: Features,
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        plan: user.tier,
        features: Features::for_tier(user.tier),
    })
}
