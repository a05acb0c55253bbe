pub mod articles;
pub mod contributors;
pub mod health;
pub mod moderation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /articles                             list published (?q, ?page, ?limit)
/// /articles/{slug}                      current head content
/// /articles/{slug}/history              full tagged revision history
/// /articles/{slug}/edits                submit edit (POST, auth required)
///
/// /moderation/pending                   FIFO review queue (admin)
/// /moderation/revisions/{id}/approve    approve pending revision (admin)
/// /moderation/revisions/{id}/reject     reject pending revision (admin)
///
/// /contributors/{id}                    contributor profile (auth required)
/// /contributors/{id}/tier               explicit tier set (PUT, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public article reads plus authenticated edit submission.
        .nest("/articles", articles::router())
        // Review queue resolution (admin only).
        .nest("/moderation", moderation::router())
        // Contributor profiles and the admin tier override.
        .nest("/contributors", contributors::router())
}
