//! Post entity model, DTOs, and the typed projection of joined rows.
//!
//! Posts are read in two queries: one for the post rows (with the category
//! name LEFT JOINed in) and one for the tag links of those posts.
//! [`PostWithRelations::assemble`] folds both result sets into the nested
//! shape returned by the API.

use std::collections::HashMap;

use inkpost_core::filter::FilterablePost;
use inkpost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::category::CategoryRef;
use super::not_blank;
use super::tag::TagRef;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    /// Owner; only this user may mutate the post.
    pub user_id: DbId,
    pub title: String,
    /// Markdown source.
    pub content: String,
    pub published: bool,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A post row with the LEFT JOINed category name.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    #[sqlx(flatten)]
    pub post: Post,
    pub category_name: Option<String>,
}

/// One tag link of a post, joined with the tag name.
#[derive(Debug, Clone, FromRow)]
pub struct PostTagRow {
    pub post_id: DbId,
    pub tag_id: DbId,
    pub tag_name: String,
}

/// A post with its category and tags resolved.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: Post,
    pub category: Option<CategoryRef>,
    pub tags: Vec<TagRef>,
}

impl PostWithRelations {
    /// Fold flat join rows into nested posts, preserving the order of `rows`.
    ///
    /// A `category_id` without a joined name (the row vanished between
    /// statements) yields `category: None`. Tag rows for posts not present
    /// in `rows` are ignored. Tags keep the order of `tag_rows`.
    pub fn assemble(rows: Vec<PostRow>, tag_rows: Vec<PostTagRow>) -> Vec<PostWithRelations> {
        let mut tags_by_post: HashMap<DbId, Vec<TagRef>> = HashMap::new();
        for row in tag_rows {
            tags_by_post.entry(row.post_id).or_default().push(TagRef {
                id: row.tag_id,
                name: row.tag_name,
            });
        }

        rows.into_iter()
            .map(|row| {
                let category = match (row.post.category_id, row.category_name) {
                    (Some(id), Some(name)) => Some(CategoryRef { id, name }),
                    (Some(id), None) => {
                        tracing::warn!(
                            post_id = row.post.id,
                            category_id = id,
                            "Dangling category reference",
                        );
                        None
                    }
                    (None, _) => None,
                };
                let tags = tags_by_post.remove(&row.post.id).unwrap_or_default();
                PostWithRelations {
                    post: row.post,
                    category,
                    tags,
                }
            })
            .collect()
    }
}

impl FilterablePost for PostWithRelations {
    fn post_id(&self) -> DbId {
        self.post.id
    }

    fn category_id(&self) -> Option<DbId> {
        self.category.as_ref().map(|c| c.id)
    }

    fn has_tag(&self, tag_id: DbId) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    fn title(&self) -> &str {
        &self.post.title
    }

    fn content(&self) -> &str {
        &self.post.content
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a post. The owner comes from the session, not the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePost {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Defaults to `true` if omitted.
    pub published: Option<bool>,
    pub category_id: Option<DbId>,
    /// When present, linked right after the insert.
    pub tag_ids: Option<Vec<DbId>>,
}

/// DTO for a partial post update.
///
/// `category_id` distinguishes "absent" (leave unchanged) from `null`
/// (clear the category).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePost {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<DbId>>,
    /// When present, replaces the full tag set after the update.
    pub tag_ids: Option<Vec<DbId>>,
}

/// Deserialize a present field (even `null`) as `Some(..)`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
