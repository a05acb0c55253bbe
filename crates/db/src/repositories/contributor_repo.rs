//! Repository for the `contributors` table.
//!
//! Counter and automatic-promotion updates go through the moderation
//! engine; this repo covers registration, lookups, and the explicit admin
//! tier override.

use moltpedia_core::tier::TrustTier;
use moltpedia_core::types::DbId;
use sqlx::PgPool;

use crate::models::contributor::{Contributor, CreateContributor};

/// Column list for contributors queries.
pub(crate) const COLUMNS: &str =
    "id, name, tier, api_key_hash, edit_count, approved_count, created_at";

/// Registration, lookup, and tier-override operations for contributors.
pub struct ContributorRepo;

impl ContributorRepo {
    /// Register a contributor. Tier defaults to `new`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContributor,
    ) -> Result<Contributor, sqlx::Error> {
        let tier = input.tier.as_deref().unwrap_or(TrustTier::New.as_str());
        let query = format!(
            "INSERT INTO contributors (name, tier, api_key_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contributor>(&query)
            .bind(&input.name)
            .bind(tier)
            .bind(&input.api_key_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a contributor by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contributor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contributors WHERE id = $1");
        sqlx::query_as::<_, Contributor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a request credential (hashed API key) to a contributor.
    pub async fn find_by_api_key_hash(
        pool: &PgPool,
        api_key_hash: &str,
    ) -> Result<Option<Contributor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contributors WHERE api_key_hash = $1");
        sqlx::query_as::<_, Contributor>(&query)
            .bind(api_key_hash)
            .fetch_optional(pool)
            .await
    }

    /// Explicit admin tier set. Unlike the automatic threshold promotion
    /// this may move a contributor in either direction. Returns `None` when
    /// no such contributor exists.
    pub async fn set_tier(
        pool: &PgPool,
        id: DbId,
        tier: TrustTier,
    ) -> Result<Option<Contributor>, sqlx::Error> {
        let query = format!("UPDATE contributors SET tier = $1 WHERE id = $2 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Contributor>(&query)
            .bind(tier.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
