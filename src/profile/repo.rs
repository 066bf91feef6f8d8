use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::profile::repo_types::{ProfileRow, UserProfile};

/// Keyed profile persistence. `put` is an upsert.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> anyhow::Result<Option<UserProfile>>;
    async fn put(&self, profile: &UserProfile) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, height_cm, weight_kg, age, sex, activity_level,
                   calorie_target, protein_target_g, diet_type, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("select profile")?;
        Ok(row.map(UserProfile::from))
    }

    async fn put(&self, profile: &UserProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, height_cm, weight_kg, age, sex, activity_level,
                                  calorie_target, protein_target_g, diet_type, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                height_cm = EXCLUDED.height_cm,
                weight_kg = EXCLUDED.weight_kg,
                age = EXCLUDED.age,
                sex = EXCLUDED.sex,
                activity_level = EXCLUDED.activity_level,
                calorie_target = EXCLUDED.calorie_target,
                protein_target_g = EXCLUDED.protein_target_g,
                diet_type = EXCLUDED.diet_type,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&profile.id)
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.age.and_then(|a| i32::try_from(a).ok()))
        .bind(profile.sex.map(|s| s.as_str()))
        .bind(profile.activity_level.map(|a| a.as_str()))
        .bind(profile.calorie_target)
        .bind(profile.protein_target_g)
        .bind(profile.diet_type.map(|d| d.as_str()))
        .bind(profile.updated_at)
        .execute(&self.db)
        .await
        .context("upsert profile")?;
        Ok(())
    }
}

/// Process-local store, used when no database is configured.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn put(&self, profile: &UserProfile) -> anyhow::Result<()> {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }
}
