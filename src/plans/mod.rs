mod catalog;
mod dto;
pub mod handlers;

pub use catalog::{
    select_recommended_plan, DietPlan, DietType, Meal, MealTotal, PlanCatalog, PlanFoodItem,
};
pub use dto::PlanSummary;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::plans_routes()
}
