//! Route definitions for the `/articles` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET  /                  -> list_articles (published only, ?q, ?page, ?limit)
/// GET  /{slug}            -> get_article (current head)
/// GET  /{slug}/history    -> get_history (full tagged revision history)
/// POST /{slug}/edits      -> submit_edit (auth required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::list_articles))
        .route("/{slug}", get(articles::get_article))
        .route("/{slug}/history", get(articles::get_history))
        .route("/{slug}/edits", post(articles::submit_edit))
}
