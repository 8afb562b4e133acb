//! Handlers for the `/posts` resource.
//!
//! All endpoints require a session via [`AuthUser`]. Mutations are limited
//! to the post's owner; other users get 403.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use inkpost_core::error::CoreError;
use inkpost_core::types::DbId;
use inkpost_db::models::post::{CreatePost, Post, PostWithRelations, UpdatePost};
use inkpost_db::models::post_tag::LinkPostTags;
use inkpost_db::repositories::{PostRepo, PostTagRepo, TagRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PostListParams;
use crate::state::AppState;

/// GET /api/posts
///
/// The caller's posts, newest first, narrowed by the optional
/// `category_id`, `tag_ids`, and `q` parameters.
pub async fn list_posts(
    auth: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<PostListParams>, QueryRejection>,
) -> AppResult<Json<Vec<PostWithRelations>>> {
    let Query(params) = params?;
    let filter = params.to_filter()?;
    let mut posts = PostRepo::list_for_user(&state.pool, auth.user_id).await?;
    posts.retain(|post| filter.matches(post));
    Ok(Json(posts))
}

/// POST /api/posts
///
/// Create a post owned by the caller, linking `tag_ids` when given.
/// Unknown tag ids are rejected before anything is written.
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    input: Result<Json<CreatePost>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostWithRelations>)> {
    let Json(input) = input?;
    input.validate()?;
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state, tag_ids).await?;
    }

    let post = PostRepo::create(&state.pool, auth.user_id, &input).await?;
    if let Some(tag_ids) = &input.tag_ids {
        PostTagRepo::link_post_tags(&state.pool, post.id, tag_ids).await?;
    }

    tracing::info!(post_id = post.id, user_id = auth.user_id, "Post created");

    let created = load_with_relations(&state, post.id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/posts/{id}
///
/// Owners see their drafts; everyone else only sees published posts.
pub async fn get_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PostWithRelations>> {
    let post = load_with_relations(&state, id).await?;
    if !post.post.published && post.post.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::not_found("Post", id)));
    }
    Ok(Json(post))
}

/// PUT /api/posts/{id}
///
/// Partial update. `tag_ids`, when present, replaces the tag set.
pub async fn update_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: Result<Json<UpdatePost>, JsonRejection>,
) -> AppResult<Json<PostWithRelations>> {
    let Json(input) = input?;
    input.validate()?;
    ensure_owner(&state, id, &auth).await?;
    if let Some(tag_ids) = &input.tag_ids {
        ensure_tags_exist(&state, tag_ids).await?;
    }

    PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Post", id)))?;
    if let Some(tag_ids) = &input.tag_ids {
        PostTagRepo::link_post_tags(&state.pool, id, tag_ids).await?;
    }

    tracing::info!(post_id = id, user_id = auth.user_id, "Post updated");

    Ok(Json(load_with_relations(&state, id).await?))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owner(&state, id, &auth).await?;

    if !PostRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Post", id)));
    }

    tracing::info!(post_id = id, user_id = auth.user_id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/posts/{id}/tags
///
/// Replace the post's tag set. `{"tag_ids": []}` removes every tag. An
/// unknown id is a 400 and leaves the current set in place.
pub async fn link_tags(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    input: Result<Json<LinkPostTags>, JsonRejection>,
) -> AppResult<Json<PostWithRelations>> {
    let Json(input) = input?;
    ensure_owner(&state, id, &auth).await?;
    ensure_tags_exist(&state, &input.tag_ids).await?;

    let linked = PostTagRepo::link_post_tags(&state.pool, id, &input.tag_ids).await?;
    tracing::info!(post_id = id, linked, "Post tags replaced");

    Ok(Json(load_with_relations(&state, id).await?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_with_relations(state: &AppState, id: DbId) -> AppResult<PostWithRelations> {
    PostRepo::find_with_relations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Post", id)))
}

/// 404 if the post is missing, 403 if the caller does not own it.
async fn ensure_owner(state: &AppState, id: DbId, auth: &AuthUser) -> AppResult<Post> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Post", id)))?;

    if post.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this post".into(),
        )));
    }
    Ok(post)
}

/// 400 naming the tag ids that have no row.
async fn ensure_tags_exist(state: &AppState, tag_ids: &[DbId]) -> AppResult<()> {
    let missing = TagRepo::missing_ids(&state.pool, tag_ids).await?;
    if missing.is_empty() {
        return Ok(());
    }
    let listed = missing
        .iter()
        .map(DbId::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::Core(CoreError::Validation(format!(
        "Unknown tag ids: {listed}"
    ))))
}
