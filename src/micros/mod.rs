//! Micronutrient enrichment for plan food items.

use serde::{Deserialize, Serialize};

mod handlers;
mod index;
mod normalize;

pub use index::{MicronutrientRow, MicrosIndex};
pub use normalize::{normalize_food_name, strip_preparation_words};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::micros_routes()
}

/// Optional micronutrient fields shared by plan items, meal totals and the
/// reference table. Wire names carry the unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Micronutrients {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnesium_mg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zinc_mg: Option<f64>,

    #[serde(rename = "vitA_ug", default, skip_serializing_if = "Option::is_none")]
    pub vit_a_ug: Option<f64>,
    #[serde(rename = "vitB1_mg", default, skip_serializing_if = "Option::is_none")]
    pub vit_b1_mg: Option<f64>,
    #[serde(rename = "vitB2_mg", default, skip_serializing_if = "Option::is_none")]
    pub vit_b2_mg: Option<f64>,
    #[serde(rename = "vitB3_mg", default, skip_serializing_if = "Option::is_none")]
    pub vit_b3_mg: Option<f64>,
    #[serde(rename = "vitB5_mg", default, skip_serializing_if = "Option::is_none")]
    pub vit_b5_mg: Option<f64>,
    #[serde(rename = "vitB6_mg", default, skip_serializing_if = "Option::is_none")]
    pub vit_b6_mg: Option<f64>,
    #[serde(rename = "vitB9_ug", default, skip_serializing_if = "Option::is_none")]
    pub vit_b9_ug: Option<f64>,
    #[serde(rename = "vitB12_ug", default, skip_serializing_if = "Option::is_none")]
    pub vit_b12_ug: Option<f64>,
    #[serde(rename = "vitC_mg", default, skip_serializing_if = "Option::is_none")]
    pub vit_c_mg: Option<f64>,
    #[serde(rename = "vitD_IU", default, skip_serializing_if = "Option::is_none")]
    pub vit_d_iu: Option<f64>,
    #[serde(rename = "vitE_mg", default, skip_serializing_if = "Option::is_none")]
    pub vit_e_mg: Option<f64>,
    #[serde(rename = "vitK_ug", default, skip_serializing_if = "Option::is_none")]
    pub vit_k_ug: Option<f64>,

    #[serde(rename = "keyAntioxidant", default, skip_serializing_if = "Option::is_none")]
    pub key_antioxidant: Option<String>,
}

impl Micronutrients {
    /// Fills every field that is `None` on `self` from `base`. Fields already
    /// set, zero included, are left alone.
    pub fn fill_missing_from(&mut self, base: &Micronutrients) {
        self.fiber_g = self.fiber_g.or(base.fiber_g);
        self.iron_mg = self.iron_mg.or(base.iron_mg);
        self.sodium_mg = self.sodium_mg.or(base.sodium_mg);
        self.calcium_mg = self.calcium_mg.or(base.calcium_mg);
        self.magnesium_mg = self.magnesium_mg.or(base.magnesium_mg);
        self.zinc_mg = self.zinc_mg.or(base.zinc_mg);

        self.vit_a_ug = self.vit_a_ug.or(base.vit_a_ug);
        self.vit_b1_mg = self.vit_b1_mg.or(base.vit_b1_mg);
        self.vit_b2_mg = self.vit_b2_mg.or(base.vit_b2_mg);
        self.vit_b3_mg = self.vit_b3_mg.or(base.vit_b3_mg);
        self.vit_b5_mg = self.vit_b5_mg.or(base.vit_b5_mg);
        self.vit_b6_mg = self.vit_b6_mg.or(base.vit_b6_mg);
        self.vit_b9_ug = self.vit_b9_ug.or(base.vit_b9_ug);
        self.vit_b12_ug = self.vit_b12_ug.or(base.vit_b12_ug);
        self.vit_c_mg = self.vit_c_mg.or(base.vit_c_mg);
        self.vit_d_iu = self.vit_d_iu.or(base.vit_d_iu);
        self.vit_e_mg = self.vit_e_mg.or(base.vit_e_mg);
        self.vit_k_ug = self.vit_k_ug.or(base.vit_k_ug);

        if self.key_antioxidant.is_none() {
            self.key_antioxidant = base.key_antioxidant.clone();
        }
    }
}
