use serde::Serialize;

use crate::plans::catalog::{DietPlan, DietType};

/// Headline of a plan, without its meal tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub diet_type: DietType,
    pub calories: i64,
    pub meal_count: usize,
    pub representative_protein: f64,
}

impl From<&DietPlan> for PlanSummary {
    fn from(p: &DietPlan) -> Self {
        Self {
            diet_type: p.diet_type,
            calories: p.calories,
            meal_count: p.meals.len(),
            representative_protein: p.representative_protein(),
        }
    }
}
