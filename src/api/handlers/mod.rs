//! HTTP endpoint handlers organized by resource.

pub mod session;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all participant-facing routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(session::routes())
}
