//! Revision models and the moderation workflow DTOs.
//!
//! Revisions are append-only: a row is written once at submission and its
//! status transitions at most once (`pending -> approved` or
//! `pending -> rejected`). Auto-published revisions are inserted already
//! `approved`.

use moltpedia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub slug: String,
    pub version: i32,
    pub title: String,
    pub content: String,
    pub author_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub resolved_by: Option<DbId>,
    pub resolved_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub published_at: Option<Timestamp>,
}

/// Request body for submitting an edit.
///
/// `base_version` is the optimistic concurrency token: it must match the
/// article's latest revision number at commit time. 0 means "create".
#[derive(Debug, Deserialize)]
pub struct SubmitEditRequest {
    pub base_version: i32,
    pub title: String,
    pub content: String,
}

/// Result of a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitOutcome {
    pub version: i32,
    /// `"published"` (auto-publish) or `"pending"` (queued for review).
    pub status: String,
}

/// Request body for rejecting a pending revision. The reason is mandatory.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// A moderation queue entry: a pending revision joined with its article
/// title and author name, ordered oldest first.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingEntry {
    pub id: DbId,
    pub slug: String,
    pub article_title: String,
    pub version: i32,
    pub title: String,
    pub author_id: DbId,
    pub author_name: String,
    pub created_at: Timestamp,
}
