use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::micros::{normalize_food_name, Micronutrients};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MicrosQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MicrosResponse {
    pub name: String,
    pub key: String,
    pub micros: Micronutrients,
}

pub fn micros_routes() -> Router<AppState> {
    Router::new().route("/foods/micros", get(get_micros))
}

#[instrument(skip(state))]
pub async fn get_micros(
    State(state): State<AppState>,
    Query(q): Query<MicrosQuery>,
) -> Result<Json<MicrosResponse>, (StatusCode, String)> {
    let micros = state
        .micros
        .micros_for_food_name(&q.name)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, "No micronutrient data".to_string()))?;
    Ok(Json(MicrosResponse {
        key: normalize_food_name(&q.name),
        name: q.name,
        micros,
    }))
}
