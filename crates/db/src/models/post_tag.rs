//! Post-tag junction model.

use inkpost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `post_tags` junction table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostTag {
    pub id: DbId,
    pub post_id: DbId,
    pub tag_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO replacing the full tag set of a post.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkPostTags {
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}
