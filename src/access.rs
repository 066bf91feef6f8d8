//! Subscription tiers and the features they unlock.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanTier {
    #[default]
    Free,
    Premium,
}

impl From<&str> for PlanTier {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("premium") {
            PlanTier::Premium
        } else {
            PlanTier::Free
        }
    }
}

impl PlanTier {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanTier::Free => "FREE",
            PlanTier::Premium => "PREMIUM",
        }
    }

    pub fn is_premium(self) -> bool {
        self == PlanTier::Premium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub full_diet_plan: bool,
    pub export_pdf: bool,
}

impl Features {
    pub fn for_tier(tier: PlanTier) -> Self {
        Self {
            full_diet_plan: tier.is_premium(),
            export_pdf: tier.is_premium(),
        }
    }
}

pub fn require_premium(tier: PlanTier, feature: &str) -> Result<(), (StatusCode, String)> {
    if tier.is_premium() {
        return Ok(());
    }
    debug!(%feature, "premium feature requested on free tier");
    Err((
        StatusCode::FORBIDDEN,
        format!("{feature} requires a Premium plan"),
    ))
}
