//! Handlers for the `/categories` resource.
//!
//! Every failure, including a bad body, a duplicate name, or a missing row,
//! is reported as one 500 message per operation; the cause is only logged.
//! Each public handler delegates to a private helper with classified errors
//! and collapses the result with [`AppError::operation`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use inkpost_core::error::CoreError;
use inkpost_core::types::DbId;
use inkpost_db::models::category::{Category, CreateCategory, UpdateCategory};
use inkpost_db::repositories::CategoryRepo;
use validator::Validate;

use super::{DeleteRequest, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories
///
/// All categories ordered by name.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool)
        .await
        .map_err(AppError::operation("Failed to fetch categories"))?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    find(&state, id)
        .await
        .map(Json)
        .map_err(AppError::operation("Failed to fetch category"))
}

/// POST /api/categories
///
/// Responds 200 (not 201) with the created row.
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategory>, JsonRejection>,
) -> AppResult<Json<Category>> {
    create(&state, payload)
        .await
        .map(Json)
        .map_err(AppError::operation("Failed to create category"))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateCategory>, JsonRejection>,
) -> AppResult<Json<Category>> {
    update(&state, id, payload)
        .await
        .map(Json)
        .map_err(AppError::operation("Failed to update category"))
}

/// DELETE /api/categories with body `{"id": ..}`
///
/// Posts in the category are kept and become uncategorised.
pub async fn delete_category(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    delete(&state, payload)
        .await
        .map_err(AppError::operation("Failed to delete category"))?;

    Ok(Json(MessageResponse {
        message: "Category deleted successfully",
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find(state: &AppState, id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))
}

async fn create(
    state: &AppState,
    payload: Result<Json<CreateCategory>, JsonRejection>,
) -> AppResult<Category> {
    let Json(input) = payload?;
    input.validate()?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");
    Ok(category)
}

async fn update(
    state: &AppState,
    id: DbId,
    payload: Result<Json<UpdateCategory>, JsonRejection>,
) -> AppResult<Category> {
    let Json(input) = payload?;
    input.validate()?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Category", id)))?;
    tracing::info!(category_id = id, "Category updated");
    Ok(category)
}

async fn delete(
    state: &AppState,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> AppResult<()> {
    let Json(DeleteRequest { id }) = payload?;

    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Category", id)));
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(())
}
