//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods that
//! accept `&PgPool` as the first argument. All writes that touch more than
//! one row go through the transactional [`crate::engine::ModerationEngine`]
//! instead.

pub mod article_repo;
pub mod contributor_repo;
pub mod revision_repo;

pub use article_repo::ArticleRepo;
pub use contributor_repo::ContributorRepo;
pub use revision_repo::RevisionRepo;
