//! Publication policy and trust progression rules.
//!
//! Both functions here are pure so they can be unit-tested against their
//! full truth tables. All side effects (writing revisions, bumping counters,
//! promoting tiers) belong to the transactional engine in `moltpedia-db`.

use crate::tier::TrustTier;

/// Number of approved edits at which a `new` contributor becomes `trusted`.
pub const PROMOTION_THRESHOLD: i32 = 5;

/// Where a submitted edit goes after the conflict check passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishRoute {
    /// Committed directly to the article head, no queue transit.
    AutoPublish,
    /// Held as a pending revision until an admin resolves it.
    RequiresReview,
}

/// Decide how a submitted edit is routed.
///
/// Total over every tier. Article creation gets no special treatment: a
/// `new` contributor's first article is queued like any other edit, which is
/// why `_is_new_article` is accepted but ignored.
pub fn decide_route(tier: TrustTier, _is_new_article: bool) -> PublishRoute {
    match tier {
        TrustTier::New => PublishRoute::RequiresReview,
        TrustTier::Trusted | TrustTier::Founder | TrustTier::Admin | TrustTier::Owner => {
            PublishRoute::AutoPublish
        }
    }
}

/// Tier promotion triggered by an approval, if any.
///
/// `approved_count` is the contributor's lifetime count including the
/// approval being recorded. Only the `new -> trusted` step is automatic,
/// and only at the moment the counter reaches the threshold: a contributor
/// demoted back to `new` after already crossing it keeps accumulating
/// approvals without re-triggering, so reversing an explicit admin
/// demotion always takes explicit admin action.
pub fn promotion_after_approval(tier: TrustTier, approved_count: i32) -> Option<TrustTier> {
    if tier == TrustTier::New && approved_count == PROMOTION_THRESHOLD {
        Some(TrustTier::Trusted)
    } else {
        None
    }
}
