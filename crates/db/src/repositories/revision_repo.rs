//! Repository for the `revisions` table.
//!
//! The moderation queue is not a separate store: it is the filtered view of
//! pending revisions, oldest first. There is no secondary structure to keep
//! in sync with revision status.

use moltpedia_core::article::REVISION_PENDING;
use moltpedia_core::types::DbId;
use sqlx::PgPool;

use crate::models::revision::{PendingEntry, Revision};

/// Column list for revisions queries.
pub(crate) const COLUMNS: &str = "id, slug, version, title, content, author_id, status, \
    created_at, resolved_by, resolved_at, rejection_reason, published_at";

/// Read operations for revisions.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Find a revision by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revisions WHERE id = $1");
        sqlx::query_as::<_, Revision>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Full history of an article, version ascending, every status tagged.
    ///
    /// Callers outside the engine decide how much of this to display.
    pub async fn history(pool: &PgPool, slug: &str) -> Result<Vec<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE slug = $1
             ORDER BY version ASC"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(slug)
            .fetch_all(pool)
            .await
    }

    /// The moderation queue: pending revisions FIFO by submission time,
    /// joined with article title and author name.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<PendingEntry>, sqlx::Error> {
        sqlx::query_as::<_, PendingEntry>(
            "SELECT r.id, r.slug, a.title AS article_title, r.version, r.title,
                    r.author_id, c.name AS author_name, r.created_at
             FROM revisions r
             JOIN articles a ON a.slug = r.slug
             JOIN contributors c ON c.id = r.author_id
             WHERE r.status = $1
             ORDER BY r.created_at ASC, r.id ASC",
        )
        .bind(REVISION_PENDING)
        .fetch_all(pool)
        .await
    }
}
