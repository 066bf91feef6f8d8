use crate::state::AppState;
use axum::Router;

mod claims;
pub mod handlers;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{AuthUser, JwtKeys};

pub fn router() -> Router<AppState> {
    handlers::me_routes()
}
