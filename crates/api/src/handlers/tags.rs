//! Handlers for the `/tags` resource.
//!
//! Mirrors the category handlers: failures collapse to a single 500 message
//! per operation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use inkpost_core::error::CoreError;
use inkpost_core::types::DbId;
use inkpost_db::models::tag::{CreateTag, Tag, UpdateTag};
use inkpost_db::repositories::TagRepo;
use validator::Validate;

use super::{DeleteRequest, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = TagRepo::list(&state.pool)
        .await
        .map_err(AppError::operation("Failed to fetch tags"))?;
    Ok(Json(tags))
}

/// GET /api/tags/{id}
pub async fn get_tag(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Tag>> {
    find(&state, id)
        .await
        .map(Json)
        .map_err(AppError::operation("Failed to fetch tag"))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    payload: Result<Json<CreateTag>, JsonRejection>,
) -> AppResult<Json<Tag>> {
    create(&state, payload)
        .await
        .map(Json)
        .map_err(AppError::operation("Failed to create tag"))
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateTag>, JsonRejection>,
) -> AppResult<Json<Tag>> {
    update(&state, id, payload)
        .await
        .map(Json)
        .map_err(AppError::operation("Failed to update tag"))
}

/// DELETE /api/tags with body `{"id": ..}`
///
/// The tag's post links go with it.
pub async fn delete_tag(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    delete(&state, payload)
        .await
        .map_err(AppError::operation("Failed to delete tag"))?;

    Ok(Json(MessageResponse {
        message: "Tag deleted successfully",
    }))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Tag> {
    TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tag", id)))
}

async fn create(state: &AppState, payload: Result<Json<CreateTag>, JsonRejection>) -> AppResult<Tag> {
    let Json(input) = payload?;
    input.validate()?;

    let tag = TagRepo::create(&state.pool, &input).await?;
    tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");
    Ok(tag)
}

async fn update(
    state: &AppState,
    id: DbId,
    payload: Result<Json<UpdateTag>, JsonRejection>,
) -> AppResult<Tag> {
    let Json(input) = payload?;
    input.validate()?;

    let tag = TagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Tag", id)))?;
    tracing::info!(tag_id = id, "Tag updated");
    Ok(tag)
}

async fn delete(state: &AppState, payload: Result<Json<DeleteRequest>, JsonRejection>) -> AppResult<()> {
    let Json(DeleteRequest { id }) = payload?;

    if !TagRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Tag", id)));
    }
    tracing::info!(tag_id = id, "Tag deleted");
    Ok(())
}
