use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::normalize::{normalize_food_name, strip_preparation_words};
use super::Micronutrients;
use crate::data::DatasetError;
use crate::plans::PlanFoodItem;

/// One raw row of the reference table, as exported from the spreadsheet.
pub type MicronutrientRow = serde_json::Map<String, Value>;

/// Generic plan names mapped to the more specific reference names.
/// Both sides are normalized before use.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("paneer", "paneer full fat"),
    ("greek yogurt", "greek yogurt low fat"),
    ("whole eggs", "whole eggs boiled"),
    ("egg whites", "egg whites boiled"),
    ("chicken breast", "chicken breast cooked"),
    ("fish", "atlantic salmon cooked"),
];

const NAME_KEYS: &[&str] = &["Food Item", "foodItem", "name"];

/// Lookup index over the micronutrient reference table, keyed by normalized
/// food name. Built once and never mutated.
#[derive(Debug, Default)]
pub struct MicrosIndex {
    by_name: HashMap<String, Micronutrients>,
}

impl MicrosIndex {
    /// Later rows overwrite earlier rows with the same normalized name.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = MicronutrientRow>,
    {
        let mut by_name = HashMap::new();
        for row in rows {
            let Some(name) = row_name(&row) else {
                continue;
            };
            by_name.insert(normalize_food_name(&name), to_micros(&row));
        }
        Self { by_name }
    }

    /// Parses a JSON array of rows. Elements that are not objects are skipped.
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let values: Vec<Value> =
            serde_json::from_str(raw).map_err(|source| DatasetError::Parse {
                dataset: "food micros",
                source,
            })?;
        let rows = values.into_iter().filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        });
        Ok(Self::from_rows(rows))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Resolves a free-text food name: alias, exact match, then one retry with
    /// preparation words removed.
    pub fn micros_for_food_name(&self, name: &str) -> Option<&Micronutrients> {
        let raw_key = normalize_food_name(name);
        let key = match alias_for(&raw_key) {
            Some(target) => normalize_food_name(target),
            None => raw_key,
        };

        if let Some(exact) = self.by_name.get(&key) {
            return Some(exact);
        }

        let simplified = strip_preparation_words(&key);
        let found = self.by_name.get(&simplified);
        if found.is_none() {
            debug!(food = %name, key = %key, "no micronutrient match");
        }
        found
    }

    /// Returns the item with missing micronutrient fields filled from the
    /// reference table. Values already on the item always win.
    pub fn enrich_plan_item(&self, mut item: PlanFoodItem) -> PlanFoodItem {
        if let Some(lookup) = self.micros_for_food_name(&item.name) {
            item.micros.fill_missing_from(lookup);
        }
        item
    }
}

fn alias_for(key: &str) -> Option<&'static str> {
    NAME_ALIASES
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

fn row_name(row: &MicronutrientRow) -> Option<String> {
    NAME_KEYS.iter().find_map(|k| text(row.get(*k)))
}

/// Finite JSON number, or a non-blank string that parses to one as a
/// decimal float. Hex and binary literals are not accepted.
fn num(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) if !s.trim().is_empty() => {
            s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

fn text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        }
        _ => None,
    }
}

fn to_micros(row: &MicronutrientRow) -> Micronutrients {
    let n = |key: &str| num(row.get(key));
    Micronutrients {
        fiber_g: n("Fiber"),
        iron_mg: n("Iron (mg)"),
        sodium_mg: n("Sodium (mg)"),
        calcium_mg: n("Calcium (mg)"),
        magnesium_mg: n("Magnesium (mg)"),
        zinc_mg: n("Zinc (mg)"),

        vit_a_ug: n("Vit A (µg)"),
        vit_b1_mg: n("Vit B1 (mg)"),
        vit_b2_mg: n("Vit B2 (mg)"),
        vit_b3_mg: n("Vit B3 (mg)"),
        vit_b5_mg: n("Vit B5 (mg)"),
        vit_b6_mg: n("Vit B6 (mg)"),
        vit_b9_ug: n("Vit B9 (µg)"),
        vit_b12_ug: n("Vit B12 (µg)"),
        vit_c_mg: n("Vit C (mg)"),
        vit_d_iu: n("Vit D (IU)"),
        vit_e_mg: n("Vit E (mg)"),
        vit_k_ug: n("Vit K (µg)"),

        key_antioxidant: text(row.get("Key Antioxidant")),
    }
}
