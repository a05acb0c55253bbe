//! Route definitions for the `/contributors` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::contributors;
use crate::state::AppState;

/// Routes mounted at `/contributors`.
///
/// ```text
/// GET /{id}       -> get_contributor (auth required)
/// PUT /{id}/tier  -> set_tier (admin only, explicit promote/demote)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(contributors::get_contributor))
        .route("/{id}/tier", put(contributors::set_tier))
}
