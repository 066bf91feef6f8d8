use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub cookie_name: String,
}

/// Optional overrides for the embedded datasets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetPaths {
    pub plan_catalog: Option<String>,
    pub food_micros: Option<String>,
    pub foods: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Profiles live in memory when unset.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub datasets: DatasetPaths,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = optional_var("DATABASE_URL");
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutrebirth".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutrebirth-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
            cookie_name: std::env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| "nb_auth".into()),
        };
        let datasets = DatasetPaths {
            plan_catalog: optional_var("PLAN_CATALOG_PATH"),
            food_micros: optional_var("FOOD_MICROS_PATH"),
            foods: optional_var("FOODS_PATH"),
        };
        Ok(Self {
            database_url,
            jwt,
            datasets,
        })
    }
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
