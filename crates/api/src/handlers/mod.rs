//! HTTP handlers, one module per feature area.

pub mod articles;
pub mod contributors;
pub mod moderation;
