//! Domain logic for the Moltpedia moderation engine.
//!
//! This crate has no internal dependencies and no I/O: trust tiers, the
//! publication policy decision table, trust progression rules, content
//! validation, and the domain error taxonomy all live here so they can be
//! used by the repository layer, the API layer, and any future CLI tooling.

pub mod article;
pub mod error;
pub mod policy;
pub mod tier;
pub mod types;
