use serde::{Deserialize, Serialize};

use crate::plans::DietType;
use crate::profile::repo_types::UserProfile;
use crate::targets::{ActivityLevel, Goal, Sex, DEFAULT_AGE};

/// Body of `PUT /profile`. A missing field keeps the stored value, or the
/// form's initial value when nothing is stored yet.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub diet_type: Option<DietType>,
}

pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

impl ProfileForm {
    /// Profile built from the form, falling back field by field to
    /// `existing` and then to the form defaults. Targets are left unset.
    pub fn resolve(&self, id: &str, existing: Option<&UserProfile>) -> UserProfile {
        let stored = existing.cloned().unwrap_or_else(|| UserProfile::empty(id));
        UserProfile {
            height_cm: Some(self.height_cm.or(stored.height_cm).unwrap_or(DEFAULT_HEIGHT_CM)),
            weight_kg: Some(self.weight_kg.or(stored.weight_kg).unwrap_or(DEFAULT_WEIGHT_KG)),
            age: Some(self.age.or(stored.age).unwrap_or(DEFAULT_AGE)),
            sex: Some(self.sex.or(stored.sex).unwrap_or_default()),
            activity_level: Some(self.activity_level.or(stored.activity_level).unwrap_or_default()),
            diet_type: Some(self.diet_type.or(stored.diet_type).unwrap_or_default()),
            ..UserProfile::empty(id)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub complete: bool,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        let complete = profile.is_complete();
        Self { profile, complete }
    }
}
