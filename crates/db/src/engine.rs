//! The moderation engine: submit, approve, reject.
//!
//! Every operation here is a single Postgres transaction. Row locks
//! (`SELECT ... FOR UPDATE`, taken article-first then contributor to keep a
//! consistent lock order) make the head-compare and version-number
//! reservation one atomic unit, so two submissions racing on the same base
//! version can never both win, and an aborted transaction leaves no
//! reserved version and no queue entry.
//!
//! Version numbers are reserved as `MAX(version) + 1` over *all* revisions
//! of the article, pending and rejected included: a rejected revision's
//! number is permanently consumed, and a pending revision's number blocks
//! later submitters (they get a conflict and must refetch). The published
//! head can therefore trail the latest reserved number while reviews are
//! outstanding, and it advances only through resolved versions: rejected
//! numbers in the gap are jumped, but a pending version below blocks both
//! approval (`OutOfOrderApproval`) and auto-publish (the submission is
//! queued behind the outstanding review regardless of tier).

use chrono::Utc;
use sqlx::{PgConnection, PgPool};

use moltpedia_core::article::{
    validate_content, validate_rejection_reason, validate_slug, validate_title,
    REVISION_APPROVED, REVISION_PENDING, REVISION_REJECTED, STATUS_DRAFT, STATUS_PUBLISHED,
};
use moltpedia_core::error::CoreError;
use moltpedia_core::policy::{decide_route, promotion_after_approval, PublishRoute};
use moltpedia_core::tier::TrustTier;
use moltpedia_core::types::DbId;

use crate::models::article::Article;
use crate::models::contributor::Contributor;
use crate::models::revision::{Revision, SubmitEditRequest, SubmitOutcome};
use crate::repositories::{article_repo, contributor_repo, revision_repo};

/// Error type for engine operations.
///
/// Domain outcomes (conflicts, policy violations) are `Core`; anything from
/// the store itself is `Database` and is classified for retryability at the
/// API layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Transactional moderation operations.
pub struct ModerationEngine;

impl ModerationEngine {
    /// Submit a proposed edit.
    ///
    /// `base_version` must equal the article's latest revision number at
    /// commit time (0 creates the article). On success the next version
    /// number is reserved and the revision is written in the same
    /// transaction that routes it: auto-published revisions land already
    /// `approved` with the head advanced, queued revisions land `pending`
    /// with the head untouched. A pending revision below the reservation
    /// forces the queue even for auto-publish tiers, so the head never
    /// jumps an unresolved version.
    pub async fn submit_edit(
        pool: &PgPool,
        slug: &str,
        input: &SubmitEditRequest,
        contributor_id: DbId,
    ) -> Result<SubmitOutcome, EngineError> {
        validate_slug(slug)?;
        validate_title(&input.title)?;
        validate_content(&input.content)?;
        if input.base_version < 0 {
            return Err(CoreError::Validation("base_version must be >= 0".into()).into());
        }

        let mut tx = pool.begin().await?;

        // Locks the per-article row for the rest of the transaction; every
        // submitter for this slug serializes here.
        let article = lock_or_create_article(&mut tx, slug, input).await?;

        // Latest reserved version spans every revision of the article, so
        // rejected numbers stay consumed and a pending revision blocks
        // further submissions against the same base.
        let (latest,): (i32,) =
            sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM revisions WHERE slug = $1")
                .bind(slug)
                .fetch_one(&mut *tx)
                .await?;

        if input.base_version != latest {
            return Err(CoreError::VersionConflict {
                current_head: latest,
            }
            .into());
        }
        let next_version = latest + 1;

        // Contributor is locked after the article (consistent order with
        // approve) so the tier read and counter bump are race-free.
        let contributor = lock_contributor(&mut tx, contributor_id).await?;
        let tier = TrustTier::parse(&contributor.tier)?;

        let is_new_article = latest == 0;
        let mut route = decide_route(tier, is_new_article);

        // The head advances only through resolved versions. When the
        // reservation sits above head + 1, rejected numbers in the gap are
        // fine, but a pending one means an unresolved review the head must
        // not jump: the submission is queued behind it whatever the tier.
        if route == PublishRoute::AutoPublish && next_version != article.head_version + 1 {
            let (pending,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM revisions WHERE slug = $1 AND status = $2")
                    .bind(slug)
                    .bind(REVISION_PENDING)
                    .fetch_one(&mut *tx)
                    .await?;
            if pending > 0 {
                route = PublishRoute::RequiresReview;
            }
        }

        sqlx::query("UPDATE contributors SET edit_count = edit_count + 1 WHERE id = $1")
            .bind(contributor_id)
            .execute(&mut *tx)
            .await?;

        let outcome = match route {
            PublishRoute::RequiresReview => {
                let insert = format!(
                    "INSERT INTO revisions (slug, version, title, content, author_id, status)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING {}",
                    revision_repo::COLUMNS
                );
                sqlx::query_as::<_, Revision>(&insert)
                    .bind(slug)
                    .bind(next_version)
                    .bind(&input.title)
                    .bind(&input.content)
                    .bind(contributor_id)
                    .bind(REVISION_PENDING)
                    .fetch_one(&mut *tx)
                    .await?;

                SubmitOutcome {
                    version: next_version,
                    status: REVISION_PENDING.to_string(),
                }
            }
            PublishRoute::AutoPublish => {
                let now = Utc::now();
                let insert = format!(
                    "INSERT INTO revisions
                        (slug, version, title, content, author_id, status,
                         resolved_by, resolved_at, published_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
                     RETURNING {}",
                    revision_repo::COLUMNS
                );
                sqlx::query_as::<_, Revision>(&insert)
                    .bind(slug)
                    .bind(next_version)
                    .bind(&input.title)
                    .bind(&input.content)
                    .bind(contributor_id)
                    .bind(REVISION_APPROVED)
                    .bind(contributor_id)
                    .bind(now)
                    .fetch_one(&mut *tx)
                    .await?;

                advance_head(&mut tx, slug, next_version, &input.title, &input.content).await?;

                sqlx::query(
                    "UPDATE contributors SET approved_count = approved_count + 1 WHERE id = $1",
                )
                .bind(contributor_id)
                .execute(&mut *tx)
                .await?;

                SubmitOutcome {
                    version: next_version,
                    status: STATUS_PUBLISHED.to_string(),
                }
            }
        };

        tx.commit().await?;

        tracing::info!(
            slug = slug,
            version = outcome.version,
            status = %outcome.status,
            contributor_id = contributor_id,
            tier = %tier,
            created = is_new_article,
            "Edit submitted"
        );

        Ok(outcome)
    }

    /// Approve a pending revision.
    ///
    /// First resolver wins: a revision that is no longer pending fails with
    /// `AlreadyResolved`. Publication order is sequential over unresolved
    /// versions: a revision can be approved only when every smaller version
    /// is already resolved (rejected numbers in the gap are jumped, a
    /// smaller pending one fails with `OutOfOrderApproval`). The head
    /// advance, the author's approval count, and any threshold promotion
    /// all commit in this one transaction.
    pub async fn approve(
        pool: &PgPool,
        revision_id: DbId,
        admin_id: DbId,
    ) -> Result<Revision, EngineError> {
        let mut tx = pool.begin().await?;

        let revision = lock_pending_revision(&mut tx, revision_id).await?;
        let article = lock_article(&mut tx, &revision.slug).await?;

        // Every pending version of the article is above the head, so a
        // pending one below this revision is an unresolved gap; anything
        // else between head and here is rejected and gets jumped.
        let (blocking,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM revisions WHERE slug = $1 AND status = $2 AND version < $3",
        )
        .bind(&revision.slug)
        .bind(REVISION_PENDING)
        .bind(revision.version)
        .fetch_one(&mut *tx)
        .await?;
        if blocking > 0 {
            return Err(CoreError::OutOfOrderApproval {
                version: revision.version,
                head: article.head_version,
            }
            .into());
        }

        let now = Utc::now();
        let update = format!(
            "UPDATE revisions
             SET status = $1, resolved_by = $2, resolved_at = $3, published_at = $3
             WHERE id = $4
             RETURNING {}",
            revision_repo::COLUMNS
        );
        let approved = sqlx::query_as::<_, Revision>(&update)
            .bind(REVISION_APPROVED)
            .bind(admin_id)
            .bind(now)
            .bind(revision_id)
            .fetch_one(&mut *tx)
            .await?;

        advance_head(
            &mut tx,
            &revision.slug,
            revision.version,
            &revision.title,
            &revision.content,
        )
        .await?;

        record_approval(&mut tx, revision.author_id).await?;

        tx.commit().await?;

        tracing::info!(
            revision_id = revision_id,
            slug = %approved.slug,
            version = approved.version,
            admin_id = admin_id,
            author_id = approved.author_id,
            "Revision approved"
        );

        Ok(approved)
    }

    /// Reject a pending revision with a mandatory reason.
    ///
    /// The head is untouched and the version number stays consumed, so the
    /// full audit trail of what was proposed and why it was refused is
    /// preserved.
    pub async fn reject(
        pool: &PgPool,
        revision_id: DbId,
        admin_id: DbId,
        reason: &str,
    ) -> Result<Revision, EngineError> {
        validate_rejection_reason(reason)?;

        let mut tx = pool.begin().await?;

        lock_pending_revision(&mut tx, revision_id).await?;

        let now = Utc::now();
        let update = format!(
            "UPDATE revisions
             SET status = $1, resolved_by = $2, resolved_at = $3, rejection_reason = $4
             WHERE id = $5
             RETURNING {}",
            revision_repo::COLUMNS
        );
        let rejected = sqlx::query_as::<_, Revision>(&update)
            .bind(REVISION_REJECTED)
            .bind(admin_id)
            .bind(now)
            .bind(reason)
            .bind(revision_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            revision_id = revision_id,
            slug = %rejected.slug,
            version = rejected.version,
            admin_id = admin_id,
            "Revision rejected"
        );

        Ok(rejected)
    }
}

/// Lock the article row, or create a draft row for a `base_version` 0
/// submission. Missing article with a non-zero base is `ArticleNotFound`.
async fn lock_or_create_article(
    conn: &mut PgConnection,
    slug: &str,
    input: &SubmitEditRequest,
) -> Result<Article, EngineError> {
    let select = format!(
        "SELECT {} FROM articles WHERE slug = $1 FOR UPDATE",
        article_repo::COLUMNS
    );
    if let Some(article) = sqlx::query_as::<_, Article>(&select)
        .bind(slug)
        .fetch_optional(&mut *conn)
        .await?
    {
        return Ok(article);
    }

    if input.base_version != 0 {
        return Err(CoreError::ArticleNotFound {
            slug: slug.to_string(),
        }
        .into());
    }

    // ON CONFLICT DO NOTHING: losing a concurrent create is not an error
    // here; the re-select locks the winner's row and the base-version check
    // then reports the conflict.
    let insert = format!(
        "INSERT INTO articles (slug, title, content, status, head_version)
         VALUES ($1, $2, $3, $4, 0)
         ON CONFLICT (slug) DO NOTHING
         RETURNING {}",
        article_repo::COLUMNS
    );
    let inserted = sqlx::query_as::<_, Article>(&insert)
        .bind(slug)
        .bind(&input.title)
        .bind(&input.content)
        .bind(STATUS_DRAFT)
        .fetch_optional(&mut *conn)
        .await?;

    match inserted {
        Some(article) => Ok(article),
        None => {
            let article = sqlx::query_as::<_, Article>(&select)
                .bind(slug)
                .fetch_one(&mut *conn)
                .await?;
            Ok(article)
        }
    }
}

/// Lock an existing article row.
async fn lock_article(conn: &mut PgConnection, slug: &str) -> Result<Article, EngineError> {
    let select = format!(
        "SELECT {} FROM articles WHERE slug = $1 FOR UPDATE",
        article_repo::COLUMNS
    );
    let article = sqlx::query_as::<_, Article>(&select)
        .bind(slug)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| CoreError::ArticleNotFound {
            slug: slug.to_string(),
        })?;
    Ok(article)
}

/// Lock a contributor row.
async fn lock_contributor(conn: &mut PgConnection, id: DbId) -> Result<Contributor, EngineError> {
    let select = format!(
        "SELECT {} FROM contributors WHERE id = $1 FOR UPDATE",
        contributor_repo::COLUMNS
    );
    let contributor = sqlx::query_as::<_, Contributor>(&select)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(CoreError::ContributorNotFound { id })?;
    Ok(contributor)
}

/// Lock a revision row and verify it is still pending.
async fn lock_pending_revision(
    conn: &mut PgConnection,
    id: DbId,
) -> Result<Revision, EngineError> {
    let select = format!(
        "SELECT {} FROM revisions WHERE id = $1 FOR UPDATE",
        revision_repo::COLUMNS
    );
    let revision = sqlx::query_as::<_, Revision>(&select)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(CoreError::RevisionNotFound { id })?;

    if revision.status != REVISION_PENDING {
        return Err(match (revision.resolved_by, revision.resolved_at) {
            (Some(resolved_by), Some(resolved_at)) => CoreError::AlreadyResolved {
                resolved_by,
                resolved_at,
            },
            _ => CoreError::Internal(format!(
                "Revision {id} has status '{}' but no resolution stamp",
                revision.status
            )),
        }
        .into());
    }

    Ok(revision)
}

/// Advance the Article Head Index to a newly published revision.
async fn advance_head(
    conn: &mut PgConnection,
    slug: &str,
    version: i32,
    title: &str,
    content: &str,
) -> Result<(), EngineError> {
    sqlx::query(
        "UPDATE articles
         SET title = $1, content = $2, status = $3, head_version = $4, updated_at = now()
         WHERE slug = $5",
    )
    .bind(title)
    .bind(content)
    .bind(STATUS_PUBLISHED)
    .bind(version)
    .bind(slug)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Bump the author's approved count and apply the threshold promotion.
///
/// Runs inside the approval transaction: approval counts gate future
/// auto-publish decisions, so they must never lag the approval itself.
async fn record_approval(conn: &mut PgConnection, author_id: DbId) -> Result<(), EngineError> {
    let author = lock_contributor(&mut *conn, author_id).await?;
    let tier = TrustTier::parse(&author.tier)?;
    let new_count = author.approved_count + 1;

    match promotion_after_approval(tier, new_count) {
        Some(promoted) => {
            sqlx::query("UPDATE contributors SET approved_count = $1, tier = $2 WHERE id = $3")
                .bind(new_count)
                .bind(promoted.as_str())
                .bind(author_id)
                .execute(&mut *conn)
                .await?;
            tracing::info!(
                contributor_id = author_id,
                approved_count = new_count,
                tier = %promoted,
                "Contributor promoted"
            );
        }
        None => {
            sqlx::query("UPDATE contributors SET approved_count = $1 WHERE id = $2")
                .bind(new_count)
                .bind(author_id)
                .execute(&mut *conn)
                .await?;
        }
    }
    Ok(())
}
