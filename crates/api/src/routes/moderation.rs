//! Route definitions for the `/moderation` resource (admin only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::moderation;
use crate::state::AppState;

/// Routes mounted at `/moderation`.
///
/// ```text
/// GET  /pending                    -> list_pending (FIFO review queue)
/// POST /revisions/{id}/approve     -> approve_revision
/// POST /revisions/{id}/reject      -> reject_revision ({ reason } mandatory)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(moderation::list_pending))
        .route("/revisions/{id}/approve", post(moderation::approve_revision))
        .route("/revisions/{id}/reject", post(moderation::reject_revision))
}
