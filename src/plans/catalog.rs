use serde::{Deserialize, Serialize};

use crate::data::DatasetError;
use crate::micros::{Micronutrients, MicrosIndex};
use crate::plans::PlanSummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    #[default]
    Vegetarian,
    NonVegetarian,
}

impl DietType {
    pub fn as_str(self) -> &'static str {
        match self {
            DietType::Vegetarian => "vegetarian",
            DietType::NonVegetarian => "non-vegetarian",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "vegetarian" => Some(DietType::Vegetarian),
            "non-vegetarian" => Some(DietType::NonVegetarian),
            _ => None,
        }
    }
}

/// A food line of a plan. Macros are absolute for the listed quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFoodItem {
    pub name: String,
    pub quantity: String,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    #[serde(flatten)]
    pub micros: Micronutrients,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTotal {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub calories: f64,
    #[serde(flatten)]
    pub micros: Micronutrients,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub meal_number: u32,
    pub items: Vec<PlanFoodItem>,
    pub total: MealTotal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    #[serde(rename = "type")]
    pub diet_type: DietType,
    pub calories: i64,
    pub meals: Vec<Meal>,
}

impl DietPlan {
    /// Sum of the meals' precomputed protein totals.
    pub fn representative_protein(&self) -> f64 {
        self.meals.iter().map(|m| m.total.protein).sum()
    }

    pub fn enriched(&self, micros: &MicrosIndex) -> DietPlan {
        let meals = self
            .meals
            .iter()
            .map(|meal| Meal {
                meal_number: meal.meal_number,
                items: meal
                    .items
                    .iter()
                    .cloned()
                    .map(|it| micros.enrich_plan_item(it))
                    .collect(),
                total: meal.total.clone(),
            })
            .collect();
        DietPlan {
            diet_type: self.diet_type,
            calories: self.calories,
            meals,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlanSeed {
    #[serde(rename = "dietPlans", default)]
    diet_plans: Vec<DietPlan>,
}

/// Immutable, ordered set of pre-authored plans. Declaration order is kept
/// because it decides ties in [`select_recommended_plan`].
#[derive(Debug, Default)]
pub struct PlanCatalog {
    plans: Vec<DietPlan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<DietPlan>) -> Self {
        Self { plans }
    }

    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let seed: PlanSeed = serde_json::from_str(raw).map_err(|source| DatasetError::Parse {
            dataset: "plan catalog",
            source,
        })?;
        Ok(Self::new(seed.diet_plans))
    }

    pub fn plans(&self) -> &[DietPlan] {
        &self.plans
    }

    /// Headlines in catalog order.
    pub fn summaries(&self) -> Vec<PlanSummary> {
        self.plans.iter().map(PlanSummary::from).collect()
    }

    pub fn find(&self, diet_type: DietType, calories: i64) -> Option<&DietPlan> {
        self.plans
            .iter()
            .find(|p| p.diet_type == diet_type && p.calories == calories)
    }

    pub fn select_recommended_plan(&self, tdee: i64, diet_type: DietType) -> Option<&DietPlan> {
        select_recommended_plan(&self.plans, tdee, diet_type)
    }
}

/// Plan of `diet_type` whose calorie level is closest to `tdee`.
///
/// Returns `None` when no plan of that type exists. On equal distance the
/// plan declared first wins.
pub fn select_recommended_plan(
    plans: &[DietPlan],
    tdee: i64,
    diet_type: DietType,
) -> Option<&DietPlan> {
    // min_by_key keeps the first of several equal minima
    plans
        .iter()
        .filter(|p| p.diet_type == diet_type)
        .min_by_key(|p| (p.calories - tdee).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    fn plan(diet_type: DietType, calories: i64, protein: f64) -> DietPlan {
        DietPlan {
            diet_type,
            calories,
            meals: vec![Meal {
                meal_number: 1,
                items: vec![],
                total: MealTotal {
                    protein,
                    carbs: 0.0,
                    fats: 0.0,
                    calories: calories as f64,
                    micros: Micronutrients::default(),
                },
            }],
        }
    }

    #[test]
    fn picks_nearest_calorie_level() {
        let plans = vec![
            plan(DietType::Vegetarian, 1600, 1.0),
            plan(DietType::Vegetarian, 2000, 2.0),
            plan(DietType::Vegetarian, 2400, 3.0),
        ];
        let best = select_recommended_plan(&plans, 2100, DietType::Vegetarian).unwrap();
        assert_eq!(best.calories, 2000);
    }

    #[test]
    fn ties_go_to_the_first_declared_plan() {
        let plans = vec![
            plan(DietType::Vegetarian, 1600, 1.0),
            plan(DietType::Vegetarian, 2000, 2.0),
        ];
        let best = select_recommended_plan(&plans, 1800, DietType::Vegetarian).unwrap();
        assert_eq!(best.calories, 1600);

        let reversed = vec![
            plan(DietType::Vegetarian, 2000, 2.0),
            plan(DietType::Vegetarian, 1600, 1.0),
        ];
        let best = select_recommended_plan(&reversed, 1800, DietType::Vegetarian).unwrap();
        assert_eq!(best.calories, 2000);
    }

    #[test]
    fn identical_plans_resolve_to_the_first() {
        let plans = vec![
            plan(DietType::Vegetarian, 2000, 10.0),
            plan(DietType::Vegetarian, 2000, 20.0),
        ];
        let best = select_recommended_plan(&plans, 2000, DietType::Vegetarian).unwrap();
        assert_eq!(best.representative_protein(), 10.0);
    }

    #[test]
    fn filters_by_diet_type_before_minimizing() {
        let plans = vec![
            plan(DietType::NonVegetarian, 2100, 1.0),
            plan(DietType::Vegetarian, 2800, 2.0),
        ];
        let best = select_recommended_plan(&plans, 2100, DietType::Vegetarian).unwrap();
        assert_eq!(best.calories, 2800);
    }

    #[test]
    fn missing_diet_type_is_no_match() {
        let plans = vec![plan(DietType::Vegetarian, 2000, 1.0)];
        assert!(select_recommended_plan(&plans, 2000, DietType::NonVegetarian).is_none());
        assert!(select_recommended_plan(&[], 2000, DietType::Vegetarian).is_none());
    }

    #[test]
    fn seed_catalog_keeps_declaration_order() {
        let catalog = PlanCatalog::from_json(data::PLAN_SEED).expect("embedded plans parse");
        let levels: Vec<(DietType, i64)> = catalog
            .plans()
            .iter()
            .map(|p| (p.diet_type, p.calories))
            .collect();
        assert_eq!(levels.len(), 8);
        assert_eq!(levels[0], (DietType::Vegetarian, 1600));
        assert_eq!(levels[4], (DietType::NonVegetarian, 1600));
        let best = catalog.select_recommended_plan(2200, DietType::NonVegetarian).unwrap();
        assert_eq!(best.calories, 2000);
    }

    #[test]
    fn parses_camel_case_and_unit_suffixed_fields() {
        let raw = r#"{ "dietPlans": [ { "type": "non-vegetarian", "calories": 1800, "meals": [
            { "mealNumber": 2,
              "items": [ { "name": "Fish", "quantity": "120 g", "protein": 26.4, "carbs": 0,
                           "fats": 9.7, "calories": 206, "vitD_IU": 0 } ],
              "total": { "protein": 26.4, "carbs": 0, "fats": 9.7, "calories": 206, "iron_mg": 0.4 } }
        ] } ] }"#;
        let catalog = PlanCatalog::from_json(raw).unwrap();
        let plan = &catalog.plans()[0];
        assert_eq!(plan.diet_type, DietType::NonVegetarian);
        assert_eq!(plan.meals[0].meal_number, 2);
        assert_eq!(plan.meals[0].items[0].micros.vit_d_iu, Some(0.0));
        assert_eq!(plan.meals[0].total.micros.iron_mg, Some(0.4));
    }

    #[test]
    fn summaries_follow_catalog_order() {
        let catalog = PlanCatalog::from_json(data::PLAN_SEED).unwrap();
        let summaries = catalog.summaries();
        assert_eq!(summaries.len(), catalog.plans().len());
        assert_eq!(summaries[2].calories, 2400);
        assert_eq!(summaries[2].meal_count, 5);
        assert_eq!(
            summaries[2].representative_protein,
            catalog.plans()[2].representative_protein()
        );
    }

    #[test]
    fn missing_plan_list_is_an_empty_catalog() {
        let catalog = PlanCatalog::from_json("{}").unwrap();
        assert!(catalog.plans().is_empty());
        assert!(PlanCatalog::from_json("not json").is_err());
    }

    #[test]
    fn enriched_plan_keeps_macros_and_totals() {
        let catalog = PlanCatalog::from_json(data::PLAN_SEED).unwrap();
        let micros = MicrosIndex::from_json(data::FOOD_MICROS_SEED).unwrap();
        let plan = catalog.find(DietType::Vegetarian, 2000).unwrap();
        let enriched = plan.enriched(&micros);

        assert_eq!(enriched.calories, plan.calories);
        assert_eq!(enriched.representative_protein(), plan.representative_protein());
        let paneer = enriched.meals[1]
            .items
            .iter()
            .find(|it| it.name == "Paneer (cottage cheese)")
            .unwrap();
        assert!(paneer.micros.calcium_mg.is_some());
        let spinach = enriched.meals[3]
            .items
            .iter()
            .find(|it| it.name == "Spinach")
            .unwrap();
        assert!(spinach.micros.iron_mg.is_some());
        assert_eq!(spinach.micros.vit_k_ug, None);
    }

    #[test]
    fn diet_type_wire_names() {
        assert_eq!(DietType::parse("non-vegetarian"), Some(DietType::NonVegetarian));
        assert_eq!(DietType::parse("vegan"), None);
        assert_eq!(
            serde_json::to_string(&DietType::NonVegetarian).unwrap(),
            "\"non-vegetarian\""
        );
    }
}
