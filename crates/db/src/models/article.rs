//! Article model: the head index row.

use moltpedia_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `articles` table.
///
/// `title` and `content` always reflect the head revision; `head_version`
/// is 0 until version 1 publishes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub head_version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
