//! Contributor model and registration/tier DTOs.

use moltpedia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contributors` table.
///
/// `tier` is the lowercase string form of `TrustTier`; parse at the
/// boundary. The API key hash never leaves the server.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contributor {
    pub id: DbId,
    pub name: String,
    pub tier: String,
    #[serde(skip_serializing)]
    pub api_key_hash: String,
    pub edit_count: i32,
    pub approved_count: i32,
    pub created_at: Timestamp,
}

/// DTO for registering a contributor (registration itself is external;
/// this is the seam the identity provider writes through).
#[derive(Debug, Deserialize)]
pub struct CreateContributor {
    pub name: String,
    /// Defaults to `new` if absent.
    pub tier: Option<String>,
    /// SHA-256 hex digest of the contributor's API key.
    pub api_key_hash: String,
}

/// Request body for an explicit admin tier set (promotion or demotion).
#[derive(Debug, Deserialize)]
pub struct SetTierRequest {
    pub tier: String,
}
