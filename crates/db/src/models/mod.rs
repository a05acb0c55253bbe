//! Row models and request/response DTOs, one module per table.

pub mod article;
pub mod contributor;
pub mod revision;
