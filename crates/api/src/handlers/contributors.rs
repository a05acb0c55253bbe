//! Handlers for contributor lookups and the admin tier override.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use moltpedia_core::error::CoreError;
use moltpedia_core::tier::TrustTier;
use moltpedia_core::types::DbId;
use moltpedia_db::models::contributor::SetTierRequest;
use moltpedia_db::repositories::ContributorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AdminContributor, AuthContributor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/contributors/{id}
pub async fn get_contributor(
    _auth: AuthContributor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contributor = ContributorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::ContributorNotFound { id }))?;
    Ok(Json(DataResponse { data: contributor }))
}

/// PUT /api/v1/contributors/{id}/tier
///
/// Explicit tier set (promotion or demotion). This is the administrative
/// override; the automatic threshold promotion never runs here.
pub async fn set_tier(
    admin: AdminContributor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetTierRequest>,
) -> AppResult<impl IntoResponse> {
    let tier = TrustTier::parse(&input.tier)?;

    let contributor = ContributorRepo::set_tier(&state.pool, id, tier)
        .await?
        .ok_or(AppError::Core(CoreError::ContributorNotFound { id }))?;

    tracing::info!(
        admin_id = admin.id,
        contributor_id = id,
        tier = %tier,
        "Contributor tier set"
    );

    Ok(Json(DataResponse { data: contributor }))
}
