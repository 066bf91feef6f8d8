use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::plans::DietType;
use crate::targets::{ActivityLevel, Sex};

/// Stored biometric profile. Fields are optional because a freshly seeded
/// profile does not carry all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub activity_level: Option<ActivityLevel>,
    pub calorie_target: Option<i64>,
    pub protein_target_g: Option<i64>,
    pub diet_type: Option<DietType>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl UserProfile {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            height_cm: None,
            weight_kg: None,
            age: None,
            sex: None,
            activity_level: None,
            calorie_target: None,
            protein_target_g: None,
            diet_type: None,
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    /// False when any of height, weight, age, sex or activity level is
    /// missing. Zero counts as missing.
    pub fn is_complete(&self) -> bool {
        let nonzero = |v: Option<f64>| matches!(v, Some(x) if x != 0.0 && !x.is_nan());
        nonzero(self.height_cm)
            && nonzero(self.weight_kg)
            && matches!(self.age, Some(a) if a != 0)
            && self.sex.is_some()
            && self.activity_level.is_some()
    }
}

/// Row of the `profiles` table.
#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub age: Option<i32>,
    pub sex: Option<String>,
    pub activity_level: Option<String>,
    pub calorie_target: Option<i64>,
    pub protein_target_g: Option<i64>,
    pub diet_type: Option<String>,
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for UserProfile {
    fn from(r: ProfileRow) -> Self {
        Self {
            id: r.id,
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            age: r.age.and_then(|a| u32::try_from(a).ok()),
            sex: non_blank(r.sex.as_deref()).map(Sex::from),
            activity_level: non_blank(r.activity_level.as_deref()).map(ActivityLevel::from),
            calorie_target: r.calorie_target,
            protein_target_g: r.protein_target_g,
            diet_type: r.diet_type.as_deref().and_then(DietType::parse),
            updated_at: r.updated_at,
        }
    }
}

/// Blank stored strings count as missing.
fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
