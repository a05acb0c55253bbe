//! Article validation and slug generation.
//!
//! Shared by the repository and API layers; limits mirror the column widths
//! of the `articles` and `revisions` tables.

use crate::error::CoreError;

/// Article statuses stored in `articles.status`.
pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_ARCHIVED: &str = "archived";

/// Revision statuses stored in `revisions.status`.
pub const REVISION_PENDING: &str = "pending";
pub const REVISION_APPROVED: &str = "approved";
pub const REVISION_REJECTED: &str = "rejected";

/// Generate a URL-safe slug from an article title.
///
/// Converts to lowercase, replaces non-alphanumeric characters with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens. Falls
/// back to `"article"` for titles with no usable characters.
pub fn generate_slug(title: &str) -> String {
    let mapped: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut result = String::with_capacity(mapped.len());
    let mut prev_hyphen = false;
    for c in mapped.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    let trimmed = result.trim_matches('-');
    if trimmed.is_empty() {
        "article".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate an article slug (non-empty, <= 200 chars, lowercase alphanumeric
/// plus hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > 200 {
        return Err(CoreError::Validation(
            "Slug must be at most 200 characters".into(),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Validate a revision title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.len() > 200 {
        return Err(CoreError::Validation(
            "Title must be at most 200 characters".into(),
        ));
    }
    Ok(())
}

/// Validate revision content (non-empty, <= 200 000 chars).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    if content.len() > 200_000 {
        return Err(CoreError::Validation(
            "Content must be at most 200000 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a rejection reason (mandatory, non-empty, <= 2000 chars).
///
/// Checked before any state change so a rejected `reject` call leaves the
/// revision untouched.
pub fn validate_rejection_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "A rejection reason is required".into(),
        ));
    }
    if reason.len() > 2000 {
        return Err(CoreError::Validation(
            "Rejection reason must be at most 2000 characters".into(),
        ));
    }
    Ok(())
}
