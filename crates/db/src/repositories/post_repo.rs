//! Repository for the `posts` table.
//!
//! Reads that return [`PostWithRelations`] issue one query for the posts
//! (category LEFT JOINed) and one for their tag links, then project the
//! flat rows through [`PostWithRelations::assemble`].

use inkpost_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostRow, PostWithRelations, UpdatePost};
use crate::repositories::PostTagRepo;

/// Column list shared across single-table queries.
const COLUMNS: &str =
    "id, user_id, title, content, published, category_id, created_at, updated_at";

/// Post columns plus the joined category name.
const ROW_SELECT: &str = "\
    SELECT p.id, p.user_id, p.title, p.content, p.published, p.category_id, \
           p.created_at, p.updated_at, c.name AS category_name \
    FROM posts p \
    LEFT JOIN categories c ON c.id = p.category_id";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post owned by `user_id`, returning the created row.
    ///
    /// `published` defaults to `true` if omitted. Tags are not linked here;
    /// see [`PostTagRepo::link_post_tags`].
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (user_id, title, content, published, category_id)
             VALUES ($1, $2, $3, COALESCE($4, true), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.published)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a bare post row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post with its category and tags.
    pub async fn find_with_relations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PostWithRelations>, sqlx::Error> {
        let query = format!("{ROW_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut posts = Self::with_relations(pool, vec![row]).await?;
        Ok(posts.pop())
    }

    /// List the posts owned by `user_id`, newest first, with relations.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PostWithRelations>, sqlx::Error> {
        let query = format!("{ROW_SELECT} WHERE p.user_id = $1 ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Self::with_relations(pool, rows).await
    }

    /// Update a post. Only non-`None` fields in `input` are applied;
    /// `category_id: Some(None)` clears the category.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                published = COALESCE($4, published),
                category_id = CASE WHEN $5 THEN $6 ELSE category_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.published)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a post by ID. Its tag links are removed by cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load tag links for `rows` and project them into nested posts.
    async fn with_relations(
        pool: &PgPool,
        rows: Vec<PostRow>,
    ) -> Result<Vec<PostWithRelations>, sqlx::Error> {
        let post_ids: Vec<DbId> = rows.iter().map(|r| r.post.id).collect();
        let tag_rows = PostTagRepo::tag_rows_for_posts(pool, &post_ids).await?;
        Ok(PostWithRelations::assemble(rows, tag_rows))
    }
}
