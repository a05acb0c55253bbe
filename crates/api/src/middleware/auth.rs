//! API-key authentication extractors for Axum handlers.
//!
//! The identity provider seam: a request credential (Bearer API key) is
//! resolved to a contributor and their trust tier. Key issuance and email
//! verification happen outside this service; keys are stored only as
//! SHA-256 digests.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use moltpedia_core::error::CoreError;
use moltpedia_core::tier::TrustTier;
use moltpedia_core::types::DbId;
use moltpedia_db::repositories::ContributorRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Hex SHA-256 digest of an API key, the form stored in `contributors`.
pub fn hash_api_key(api_key: &str) -> String {
    let digest = Sha256::digest(api_key.as_bytes());
    format!("{digest:x}")
}

/// Authenticated contributor extracted from a Bearer API key in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(contributor: AuthContributor) -> AppResult<Json<()>> {
///     tracing::info!(contributor_id = contributor.id, tier = %contributor.tier, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthContributor {
    /// The contributor's internal database id.
    pub id: DbId,
    /// The contributor's trust tier as supplied by the identity lookup.
    pub tier: TrustTier,
}

impl FromRequestParts<AppState> for AuthContributor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let api_key = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <api key>".into(),
            ))
        })?;

        let contributor = ContributorRepo::find_by_api_key_hash(&state.pool, &hash_api_key(api_key))
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid API key".into())))?;

        let tier = TrustTier::parse(&contributor.tier)?;

        Ok(AuthContributor {
            id: contributor.id,
            tier,
        })
    }
}

/// Authenticated contributor whose tier is `admin` or above.
///
/// Moderation endpoints trust the tier the identity lookup supplies; there
/// is no separate permission system.
#[derive(Debug, Clone)]
pub struct AdminContributor {
    pub id: DbId,
    pub tier: TrustTier,
}

impl FromRequestParts<AppState> for AdminContributor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let contributor = AuthContributor::from_request_parts(parts, state).await?;
        if !contributor.tier.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        Ok(AdminContributor {
            id: contributor.id,
            tier: contributor.tier,
        })
    }
}
