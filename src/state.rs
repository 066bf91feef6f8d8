use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::{AppConfig, DatasetPaths};
use crate::data;
use crate::micros::MicrosIndex;
use crate::plans::PlanCatalog;
use crate::profile::{MemoryProfileStore, PgProfileStore, ProfileStore};
use crate::progress::FoodCatalog;

/// Shared application state. Datasets are built once and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub profiles: Arc<dyn ProfileStore>,
    pub catalog: Arc<PlanCatalog>,
    pub micros: Arc<MicrosIndex>,
    pub foods: Arc<FoodCatalog>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let profiles = match &config.database_url {
            Some(url) => {
                let db = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;
                if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
                    tracing::warn!(error = %e, "migration failed; continuing");
                }
                Arc::new(PgProfileStore::new(db)) as Arc<dyn ProfileStore>
            }
            None => {
                tracing::info!("DATABASE_URL not set; profiles are kept in memory");
                Arc::new(MemoryProfileStore::default()) as Arc<dyn ProfileStore>
            }
        };

        Self::from_parts(config.clone(), profiles, &config.datasets)
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        profiles: Arc<dyn ProfileStore>,
        paths: &DatasetPaths,
    ) -> anyhow::Result<Self> {
        let catalog =
            PlanCatalog::from_json(&data::load(paths.plan_catalog.as_deref(), data::PLAN_SEED)?)?;
        let micros =
            MicrosIndex::from_json(&data::load(paths.food_micros.as_deref(), data::FOOD_MICROS_SEED)?)?;
        let foods = FoodCatalog::from_json(&data::load(paths.foods.as_deref(), data::FOODS_SEED)?)?;

        tracing::info!(
            plans = catalog.plans().len(),
            micros = micros.len(),
            foods = foods.len(),
            "datasets loaded"
        );

        Ok(Self {
            config,
            profiles,
            catalog: Arc::new(catalog),
            micros: Arc::new(micros),
            foods: Arc::new(foods),
        })
    }

    /// In-memory state over the embedded datasets.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test".into(),
                audience: "test".into(),
                ttl_minutes: 5,
                cookie_name: "nb_auth".into(),
            },
            datasets: DatasetPaths::default(),
        });
        let profiles = Arc::new(MemoryProfileStore::default()) as Arc<dyn ProfileStore>;
        Self::from_parts(config, profiles, &DatasetPaths::default()).expect("embedded datasets ok")
    }
}
