//! Repository for the `post_tags` junction table.
//!
//! The central operation is [`PostTagRepo::link_post_tags`], which replaces
//! a post's whole tag set with a delete followed by an insert.

use inkpost_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::PostTagRow;
use crate::models::post_tag::PostTag;

/// Column list for `post_tags` queries.
const COLUMNS: &str = "id, post_id, tag_id, created_at, updated_at";

/// Provides link management for posts and tags.
pub struct PostTagRepo;

impl PostTagRepo {
    /// Replace every tag link of `post_id` with `tag_ids`.
    ///
    /// Runs as two separate statements on the pool with no transaction: a
    /// failure after the delete leaves the post untagged until the call is
    /// retried, and concurrent readers may observe zero tags in between.
    /// Repeated ids are collapsed; an empty slice only deletes.
    ///
    /// Returns the number of links inserted.
    pub async fn link_post_tags(
        pool: &PgPool,
        post_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(pool)
            .await?;

        let tag_ids = dedup_preserving_order(tag_ids);
        if tag_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            "INSERT INTO post_tags (post_id, tag_id) \
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(post_id)
        .bind(&tag_ids)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List the raw link rows of a post.
    pub async fn list_for_post(pool: &PgPool, post_id: DbId) -> Result<Vec<PostTag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM post_tags WHERE post_id = $1 ORDER BY tag_id");
        sqlx::query_as::<_, PostTag>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Tag links (with tag names) for a batch of posts, ordered by tag name.
    pub async fn tag_rows_for_posts(
        pool: &PgPool,
        post_ids: &[DbId],
    ) -> Result<Vec<PostTagRow>, sqlx::Error> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, PostTagRow>(
            "SELECT pt.post_id, pt.tag_id, t.name AS tag_name \
             FROM post_tags pt \
             JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = ANY($1) \
             ORDER BY t.name",
        )
        .bind(post_ids)
        .fetch_all(pool)
        .await
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
fn dedup_preserving_order(ids: &[DbId]) -> Vec<DbId> {
    let mut out: Vec<DbId> = Vec::with_capacity(ids.len());
    for &id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
