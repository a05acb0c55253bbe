use crate::types::{DbId, Timestamp};

/// Domain error taxonomy for the moderation engine.
///
/// Every rejected operation surfaces as a typed variant the caller must
/// handle; nothing is silently swallowed. Only transient storage failures
/// (mapped at the API layer) are eligible for automatic retry.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The submitted base version does not match the latest revision of the
    /// article. Recoverable: the caller refetches the head and retries.
    #[error("Base version is outdated, current head is {current_head}")]
    VersionConflict { current_head: i32 },

    /// The article does not exist and the submission was not a create
    /// (`base_version` 0). Not retryable with the same input.
    #[error("Article not found: {slug}")]
    ArticleNotFound { slug: String },

    /// No revision with the given id exists.
    #[error("Revision not found: {id}")]
    RevisionNotFound { id: DbId },

    /// An earlier version is still pending; publication order must be
    /// sequential even though review order need not be.
    #[error("Cannot approve version {version} while head is {head}; earlier versions are unresolved")]
    OutOfOrderApproval { version: i32, head: i32 },

    /// The revision was already approved or rejected. First resolver wins;
    /// the second gets this explicit conflict, never a silent no-op.
    #[error("Revision already resolved by contributor {resolved_by} at {resolved_at}")]
    AlreadyResolved {
        resolved_by: DbId,
        resolved_at: Timestamp,
    },

    /// No contributor with the given id exists.
    #[error("Contributor not found: {id}")]
    ContributorNotFound { id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
