use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::plans::{PlanCatalog, PlanSummary};
use crate::profile::dto::ProfileForm;
use crate::profile::repo::ProfileStore;
use crate::profile::repo_types::UserProfile;
use crate::targets::{
    calc_bmr, calc_protein_target, calc_tdee, ActivityLevel, Goal, Targets,
};

pub const LOCAL_PROFILE_ID: &str = "local";

/// What the dashboard shows: an edit prompt, or targets with the closest plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Dashboard {
    Incomplete,
    Ready {
        targets: Targets,
        recommendation: Option<PlanSummary>,
    },
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{0} must be a positive number")]
    InvalidMeasurement(&'static str),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Targets for a complete profile; `None` behind the completeness gate.
///
/// A stored protein target wins over the default of 1.6 g/kg.
pub fn compute_targets(profile: &UserProfile) -> Option<Targets> {
    if !profile.is_complete() {
        return None;
    }
    let weight = profile.weight_kg?;
    let height = profile.height_cm?;
    let bmr = calc_bmr(weight, height, profile.age, profile.sex);
    let tdee = calc_tdee(bmr, profile.activity_level);
    let protein_g = profile
        .protein_target_g
        .unwrap_or_else(|| calc_protein_target(weight, Some(Goal::Build)));
    Some(Targets {
        bmr,
        tdee,
        protein_g,
    })
}

pub async fn targets_for(
    store: &dyn ProfileStore,
    id: &str,
) -> anyhow::Result<Option<(UserProfile, Targets)>> {
    let profile = store.get(id).await?;
    Ok(profile.and_then(|p| compute_targets(&p).map(|t| (p, t))))
}

/// Computes targets, writes them back to the profile and picks a plan.
/// A failed write is logged and otherwise ignored.
pub async fn refresh_dashboard(
    store: &dyn ProfileStore,
    catalog: &PlanCatalog,
    profile: UserProfile,
) -> Dashboard {
    let Some(targets) = compute_targets(&profile) else {
        debug!(profile_id = %profile.id, "profile incomplete");
        return Dashboard::Incomplete;
    };

    let updated = UserProfile {
        calorie_target: Some(targets.tdee),
        protein_target_g: Some(targets.protein_g),
        updated_at: OffsetDateTime::now_utc(),
        ..profile
    };
    if let Err(e) = store.put(&updated).await {
        warn!(error = %e, profile_id = %updated.id, "persisting targets failed");
    }

    let diet_type = updated.diet_type.unwrap_or_default();
    let recommendation = catalog
        .select_recommended_plan(targets.tdee, diet_type)
        .map(PlanSummary::from);
    match &recommendation {
        Some(plan) => debug!(tdee = targets.tdee, plan_kcal = plan.calories, "plan recommended"),
        None => info!(tdee = targets.tdee, diet_type = diet_type.as_str(), "no plan for diet type"),
    }

    Dashboard::Ready {
        targets,
        recommendation,
    }
}

pub async fn load_dashboard(
    store: &dyn ProfileStore,
    catalog: &PlanCatalog,
    id: &str,
) -> anyhow::Result<Dashboard> {
    Ok(match store.get(id).await? {
        Some(profile) => refresh_dashboard(store, catalog, profile).await,
        None => Dashboard::Incomplete,
    })
}

/// Stores the profile form, with the protein target derived from the goal,
/// then refreshes the dashboard. Fields missing from the form keep their
/// stored values.
pub async fn save_profile_form(
    store: &dyn ProfileStore,
    catalog: &PlanCatalog,
    id: &str,
    form: ProfileForm,
) -> Result<Dashboard, ProfileError> {
    let existing = store.get(id).await?;
    let mut profile = form.resolve(id, existing.as_ref());

    let height = profile.height_cm.unwrap_or_default();
    if !(height.is_finite() && height > 0.0) {
        return Err(ProfileError::InvalidMeasurement("heightCm"));
    }
    let weight = profile.weight_kg.unwrap_or_default();
    if !(weight.is_finite() && weight > 0.0) {
        return Err(ProfileError::InvalidMeasurement("weightKg"));
    }

    profile.protein_target_g = Some(calc_protein_target(weight, Some(form.goal.unwrap_or_default())));
    profile.updated_at = OffsetDateTime::now_utc();
    store.put(&profile).await?;
    info!(profile_id = %id, "profile saved");

    Ok(refresh_dashboard(store, catalog, profile).await)
}

/// Stores the starter profile for the local user if none exists. It lacks age
/// and sex, so the first dashboard read asks for an edit.
pub async fn seed_default_profile(store: &dyn ProfileStore) -> anyhow::Result<bool> {
    if store.get(LOCAL_PROFILE_ID).await?.is_some() {
        return Ok(false);
    }
    let profile = UserProfile {
        height_cm: Some(170.0),
        weight_kg: Some(70.0),
        activity_level: Some(ActivityLevel::Moderate),
        protein_target_g: Some(100),
        ..UserProfile::empty(LOCAL_PROFILE_ID)
    };
    store.put(&profile).await?;
    info!("seeded default local profile");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::plans::DietType;
    use crate::profile::repo::MemoryProfileStore;
    use crate::targets::Sex;
    use async_trait::async_trait;

    fn catalog() -> PlanCatalog {
        PlanCatalog::from_json(data::PLAN_SEED).unwrap()
    }

    fn complete(id: &str) -> UserProfile {
        UserProfile {
            height_cm: Some(170.0),
            weight_kg: Some(70.0),
            age: Some(30),
            sex: Some(Sex::Male),
            activity_level: Some(ActivityLevel::Moderate),
            ..UserProfile::empty(id)
        }
    }

    fn form() -> ProfileForm {
        serde_json::from_str("{}").unwrap()
    }

    struct FailingStore;

    #[async_trait]
    impl ProfileStore for FailingStore {
        async fn get(&self, _id: &str) -> anyhow::Result<Option<UserProfile>> {
            Ok(None)
        }
        async fn put(&self, _p: &UserProfile) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn targets_for_default_profile() {
        let t = compute_targets(&complete("local")).unwrap();
        assert_eq!(t.bmr, 1617.5);
        assert_eq!(t.tdee, 2507);
        assert_eq!(t.protein_g, 112);
    }

    #[test]
    fn stored_protein_target_wins() {
        let p = UserProfile {
            protein_target_g: Some(84),
            ..complete("local")
        };
        assert_eq!(compute_targets(&p).unwrap().protein_g, 84);
    }

    #[test]
    fn incomplete_profile_has_no_targets() {
        let p = UserProfile {
            age: None,
            ..complete("local")
        };
        assert!(compute_targets(&p).is_none());
    }

    #[tokio::test]
    async fn refresh_persists_targets_and_recommends() {
        let store = MemoryProfileStore::default();
        let dash = refresh_dashboard(&store, &catalog(), complete("local")).await;

        let Dashboard::Ready { targets, recommendation } = dash else {
            panic!("expected ready dashboard");
        };
        assert_eq!(targets.tdee, 2507);
        let plan = recommendation.unwrap();
        assert_eq!(plan.diet_type, DietType::Vegetarian);
        assert_eq!(plan.calories, 2400);

        let stored = store.get("local").await.unwrap().unwrap();
        assert_eq!(stored.calorie_target, Some(2507));
        assert_eq!(stored.protein_target_g, Some(112));
    }

    #[tokio::test]
    async fn refresh_survives_store_failure() {
        let dash = refresh_dashboard(&FailingStore, &catalog(), complete("local")).await;
        assert!(matches!(dash, Dashboard::Ready { .. }));
    }

    #[tokio::test]
    async fn no_plan_for_diet_type_is_not_an_error() {
        let only_veg = PlanCatalog::new(
            catalog()
                .plans()
                .iter()
                .filter(|p| p.diet_type == DietType::Vegetarian)
                .cloned()
                .collect(),
        );
        let p = UserProfile {
            diet_type: Some(DietType::NonVegetarian),
            ..complete("local")
        };
        let dash = refresh_dashboard(&MemoryProfileStore::default(), &only_veg, p).await;
        assert!(matches!(dash, Dashboard::Ready { recommendation: None, .. }));
    }

    #[tokio::test]
    async fn seeded_profile_prompts_for_edit() {
        let store = MemoryProfileStore::default();
        assert!(seed_default_profile(&store).await.unwrap());
        assert!(!seed_default_profile(&store).await.unwrap());

        let dash = load_dashboard(&store, &catalog(), LOCAL_PROFILE_ID).await.unwrap();
        assert_eq!(dash, Dashboard::Incomplete);
    }

    #[tokio::test]
    async fn missing_profile_prompts_for_edit() {
        let dash = load_dashboard(&MemoryProfileStore::default(), &catalog(), "nobody")
            .await
            .unwrap();
        assert_eq!(dash, Dashboard::Incomplete);
    }

    #[tokio::test]
    async fn form_save_derives_protein_from_goal() {
        let store = MemoryProfileStore::default();
        let f = ProfileForm {
            goal: Some(Goal::Maintain),
            diet_type: Some(DietType::NonVegetarian),
            ..form()
        };
        let dash = save_profile_form(&store, &catalog(), "local", f).await.unwrap();

        let Dashboard::Ready { targets, recommendation } = dash else {
            panic!("expected ready dashboard");
        };
        assert_eq!(targets.protein_g, 84);
        assert_eq!(recommendation.unwrap().diet_type, DietType::NonVegetarian);

        let stored = store.get("local").await.unwrap().unwrap();
        assert_eq!(stored.protein_target_g, Some(84));
        assert_eq!(stored.calorie_target, Some(2507));
    }

    #[tokio::test]
    async fn form_rejects_non_positive_measurements() {
        let store = MemoryProfileStore::default();
        let f = ProfileForm {
            height_cm: Some(0.0),
            ..form()
        };
        let err = save_profile_form(&store, &catalog(), "local", f).await.unwrap_err();
        assert!(matches!(err, ProfileError::InvalidMeasurement("heightCm")));

        let f = ProfileForm {
            weight_kg: Some(-3.0),
            ..form()
        };
        let err = save_profile_form(&store, &catalog(), "local", f).await.unwrap_err();
        assert!(matches!(err, ProfileError::InvalidMeasurement("weightKg")));
        assert!(store.get("local").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn partial_form_keeps_stored_biometrics() {
        let store = MemoryProfileStore::default();
        let full = ProfileForm {
            height_cm: Some(185.0),
            weight_kg: Some(95.0),
            age: Some(45),
            sex: Some(Sex::Female),
            activity_level: Some(ActivityLevel::Active),
            ..form()
        };
        save_profile_form(&store, &catalog(), "local", full).await.unwrap();

        let diet_only = ProfileForm {
            diet_type: Some(DietType::NonVegetarian),
            ..form()
        };
        save_profile_form(&store, &catalog(), "local", diet_only).await.unwrap();

        let stored = store.get("local").await.unwrap().unwrap();
        assert_eq!(stored.height_cm, Some(185.0));
        assert_eq!(stored.weight_kg, Some(95.0));
        assert_eq!(stored.age, Some(45));
        assert_eq!(stored.sex, Some(Sex::Female));
        assert_eq!(stored.activity_level, Some(ActivityLevel::Active));
        assert_eq!(stored.diet_type, Some(DietType::NonVegetarian));
        assert_eq!(stored.protein_target_g, Some(152));
    }

    #[tokio::test]
    async fn partial_form_completes_seeded_profile() {
        let store = MemoryProfileStore::default();
        seed_default_profile(&store).await.unwrap();
        let f = ProfileForm {
            weight_kg: Some(60.0),
            ..form()
        };
        let dash = save_profile_form(&store, &catalog(), LOCAL_PROFILE_ID, f).await.unwrap();
        assert!(matches!(dash, Dashboard::Ready { .. }));

        let stored = store.get(LOCAL_PROFILE_ID).await.unwrap().unwrap();
        assert_eq!(stored.height_cm, Some(170.0));
        assert_eq!(stored.age, Some(30));
        assert_eq!(stored.sex, Some(Sex::Male));
    }
}
