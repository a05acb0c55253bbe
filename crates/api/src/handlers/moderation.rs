//! Handlers for the moderation queue and admin resolution.
//!
//! Authorization is the supplied trust tier: the identity provider decides
//! who is an admin, these handlers only require it.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use moltpedia_core::types::DbId;
use moltpedia_db::engine::ModerationEngine;
use moltpedia_db::models::revision::RejectRequest;
use moltpedia_db::repositories::RevisionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AdminContributor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/moderation/pending
///
/// The review queue: pending revisions, oldest first.
pub async fn list_pending(
    _admin: AdminContributor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let queue = RevisionRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: queue }))
}

/// POST /api/v1/moderation/revisions/{revision_id}/approve
///
/// Approve a pending revision and publish it at the head. Approvals must be
/// sequential per article; resolving twice is a conflict, not a no-op.
pub async fn approve_revision(
    admin: AdminContributor,
    State(state): State<AppState>,
    Path(revision_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let revision = ModerationEngine::approve(&state.pool, revision_id, admin.id).await?;

    tracing::info!(
        admin_id = admin.id,
        revision_id = revision_id,
        slug = %revision.slug,
        version = revision.version,
        "Pending revision approved"
    );

    Ok(Json(DataResponse { data: revision }))
}

/// POST /api/v1/moderation/revisions/{revision_id}/reject
///
/// Reject a pending revision. The reason is mandatory and is kept with the
/// revision forever; the version number stays consumed.
pub async fn reject_revision(
    admin: AdminContributor,
    State(state): State<AppState>,
    Path(revision_id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    let revision =
        ModerationEngine::reject(&state.pool, revision_id, admin.id, &input.reason).await?;

    tracing::info!(
        admin_id = admin.id,
        revision_id = revision_id,
        slug = %revision.slug,
        version = revision.version,
        "Pending revision rejected"
    );

    Ok(Json(DataResponse { data: revision }))
}
