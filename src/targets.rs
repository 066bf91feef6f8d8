//! Energy and protein target formulas.
//!
//! BMR uses Mifflin–St Jeor, TDEE scales it by a fixed activity factor and
//! the protein target is a goal-dependent grams-per-kilogram multiplier.
//! Inputs are not validated here; the profile layer guards them.

use serde::{Deserialize, Serialize};

pub const DEFAULT_AGE: u32 = 30;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Maintain,
    #[default]
    Build,
    Lose,
}

impl From<&str> for Sex {
    /// Anything other than "female" or "other" is treated as male.
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Sex::Female,
            "other" => Sex::Other,
            _ => Sex::Male,
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "active" => ActivityLevel::Active,
            _ => ActivityLevel::Moderate,
        }
    }
}

impl From<&str> for Goal {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "maintain" => Goal::Maintain,
            "lose" => Goal::Lose,
            _ => Goal::Build,
        }
    }
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
        }
    }
}

impl Goal {
    /// Protein grams per kilogram of body weight.
    pub fn protein_factor(self) -> f64 {
        match self {
            Goal::Maintain => 1.2,
            Goal::Build => 1.6,
            Goal::Lose => 1.4,
        }
    }
}

/// Rounds halves towards positive infinity.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Basal metabolic rate in kcal/day. Not rounded.
pub fn calc_bmr(weight_kg: f64, height_cm: f64, age: Option<u32>, sex: Option<Sex>) -> f64 {
    let age = f64::from(age.unwrap_or(DEFAULT_AGE));
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age;
    match sex.unwrap_or_default() {
        Sex::Female => base - 161.0,
        Sex::Male | Sex::Other => base + 5.0,
    }
}

/// Total daily energy expenditure in kcal/day, rounded.
pub fn calc_tdee(bmr: f64, activity: Option<ActivityLevel>) -> i64 {
    round_half_up(bmr * activity.unwrap_or_default().factor())
}

/// Daily protein target in grams, rounded.
pub fn calc_protein_target(weight_kg: f64, goal: Option<Goal>) -> i64 {
    round_half_up(weight_kg * goal.unwrap_or_default().protein_factor())
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Targets {
    pub bmr: f64,
    pub tdee: i64,
    pub protein_g: i64,
}
