//! Contributor trust tiers.
//!
//! Tiers form an ordered ladder: `New < Trusted < Founder < Admin < Owner`.
//! They are stored as lowercase TEXT in the `contributors` table and parsed
//! at the boundary; all comparisons go through the enum's `Ord` impl rather
//! than string matching.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A contributor's graduated permission level.
///
/// Controls whether edits auto-publish or enter the review queue. Declaration
/// order defines the ladder, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustTier {
    New,
    Trusted,
    Founder,
    Admin,
    Owner,
}

impl TrustTier {
    /// The lowercase string form stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TrustTier::New => "new",
            TrustTier::Trusted => "trusted",
            TrustTier::Founder => "founder",
            TrustTier::Admin => "admin",
            TrustTier::Owner => "owner",
        }
    }

    /// Parse the stored string form. Unknown values are a validation error.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "new" => Ok(TrustTier::New),
            "trusted" => Ok(TrustTier::Trusted),
            "founder" => Ok(TrustTier::Founder),
            "admin" => Ok(TrustTier::Admin),
            "owner" => Ok(TrustTier::Owner),
            other => Err(CoreError::Validation(format!(
                "Unknown trust tier '{other}'"
            ))),
        }
    }

    /// Whether this tier may resolve moderation queue entries.
    pub fn is_admin(self) -> bool {
        self >= TrustTier::Admin
    }
}

impl std::fmt::Display for TrustTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
