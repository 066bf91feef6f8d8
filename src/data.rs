//! Static datasets: the plan catalog, the micronutrient reference table and
//! the food logging catalog. Each can be overridden by a file path from the
//! environment; otherwise the copy embedded at build time is used.

use std::borrow::Cow;

use thiserror::Error;
use tracing::info;

pub const PLAN_SEED: &str = include_str!("../data/plan_seed.json");
pub const FOOD_MICROS_SEED: &str = include_str!("../data/food_micros_seed.json");
pub const FOODS_SEED: &str = include_str!("../data/foods_seed.json");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("read dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {dataset} dataset: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load(path: Option<&str>, embedded: &'static str) -> Result<Cow<'static, str>, DatasetError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
                path: path.to_string(),
                source,
            })?;
            info!(%path, bytes = raw.len(), "dataset loaded from file");
            Ok(Cow::Owned(raw))
        }
        None => Ok(Cow::Borrowed(embedded)),
    }
}
