//! Tag entity model and DTOs.

use inkpost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_blank;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight tag info embedded in post responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a new tag.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTag {
    #[validate(length(min = 1, max = 64), custom(function = "not_blank"))]
    pub name: String,
}

/// DTO for renaming a tag.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTag {
    #[validate(length(min = 1, max = 64), custom(function = "not_blank"))]
    pub name: Option<String>,
}
