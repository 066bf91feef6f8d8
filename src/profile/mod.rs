mod dto;
pub mod handlers;
mod repo;
mod repo_types;
pub mod services;

pub use dto::{ProfileForm, ProfileResponse};
pub use repo::{MemoryProfileStore, PgProfileStore, ProfileStore};
pub use repo_types::UserProfile;
pub use services::{compute_targets, Dashboard, LOCAL_PROFILE_ID};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
