//! Daily protein progress against the profile's target.

mod dto;
pub mod handlers;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::DatasetError;
use crate::state::AppState;
use crate::targets::round_half_up;
use axum::Router;

pub use dto::{LoggedItem, ProgressRequest, ProgressResponse};

pub fn router() -> Router<AppState> {
    handlers::progress_routes()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Per100g {
    pub calories: f64,
    pub protein: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Serving {
    pub label: String,
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub per100g: Per100g,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_serving: Option<Serving>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FoodsSeed {
    #[serde(default)]
    foods: Vec<FoodItem>,
}

/// Foods available for meal logging, by id.
#[derive(Debug, Default)]
pub struct FoodCatalog {
    by_id: HashMap<String, FoodItem>,
}

impl FoodCatalog {
    pub fn new(foods: Vec<FoodItem>) -> Self {
        Self {
            by_id: foods.into_iter().map(|f| (f.id.clone(), f)).collect(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let seed: FoodsSeed = serde_json::from_str(raw).map_err(|source| DatasetError::Parse {
            dataset: "foods",
            source,
        })?;
        Ok(Self::new(seed.foods))
    }

    pub fn get(&self, id: &str) -> Option<&FoodItem> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Protein eaten across logged items. Unknown foods count as zero.
pub fn consumed_protein(items: &[LoggedItem], foods: &FoodCatalog) -> f64 {
    items
        .iter()
        .filter_map(|it| {
            let food = foods.get(&it.food_id)?;
            (food.per100g.protein != 0.0).then(|| food.per100g.protein * it.grams / 100.0)
        })
        .sum()
}

/// Percentage of `target` reached, capped at 100; 0 without a target.
pub fn progress_percent(value: f64, target: i64) -> i64 {
    if target <= 0 {
        return 0;
    }
    round_half_up(value / target as f64 * 100.0).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    fn foods() -> FoodCatalog {
        FoodCatalog::from_json(data::FOODS_SEED).unwrap()
    }

    fn logged(food_id: &str, grams: f64) -> LoggedItem {
        LoggedItem {
            food_id: food_id.into(),
            grams,
        }
    }

    #[test]
    fn sums_protein_per_hundred_grams() {
        let items = [logged("paneer", 200.0), logged("whey", 30.0)];
        let total = consumed_protein(&items, &foods());
        assert!((total - (36.6 + 24.0)).abs() < 1e-9);
    }

    #[test]
    fn unknown_and_protein_free_foods_add_nothing() {
        let items = [logged("unicorn", 500.0), logged("olive-oil", 14.0)];
        assert_eq!(consumed_protein(&items, &foods()), 0.0);
        assert_eq!(consumed_protein(&[], &foods()), 0.0);
    }

    #[test]
    fn percent_is_capped_and_zero_without_target() {
        assert_eq!(progress_percent(56.0, 112), 50);
        assert_eq!(progress_percent(250.0, 112), 100);
        assert_eq!(progress_percent(10.0, 0), 0);
        assert_eq!(progress_percent(0.5, 200), 0);
    }

    #[test]
    fn seed_catalog_loads() {
        let foods = foods();
        assert!(!foods.is_empty());
        let chicken = foods.get("chicken-breast").unwrap();
        assert_eq!(chicken.per100g.carbs, None);
        assert_eq!(chicken.default_serving.as_ref().unwrap().grams, 120.0);
    }
}
