//! Repository for the `articles` table.
//!
//! Reads of "current article content" always go through this head index,
//! never by scanning `revisions` for the latest approved row, so read
//! latency is independent of history depth. Head advances happen only in
//! the moderation engine's transactions.

use moltpedia_core::article::STATUS_PUBLISHED;
use sqlx::PgPool;

use crate::models::article::Article;

/// Column list for articles queries.
pub(crate) const COLUMNS: &str =
    "id, slug, title, content, status, head_version, created_at, updated_at";

/// Read operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Find an article by slug, whatever its status.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE slug = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List published articles with an optional ILIKE search over title and
    /// content, newest-updated first.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let pattern = search.map(|q| format!("%{q}%"));
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE status = $1
               AND ($2::TEXT IS NULL OR title ILIKE $2 OR content ILIKE $2)
             ORDER BY updated_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(STATUS_PUBLISHED)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
