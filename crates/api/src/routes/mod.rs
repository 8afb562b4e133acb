pub mod auth;
pub mod categories;
pub mod health;
pub mod posts;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                       signup (public)
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current user (requires auth)
///
/// /categories                        list, create, delete (body {id})
/// /categories/{id}                   get, update
///
/// /tags                              list, create, delete (body {id})
/// /tags/{id}                         get, update
///
/// /posts                             list (filtered), create
/// /posts/{id}                        get, update, delete
/// /posts/{id}/tags                   replace tag set (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
        .nest("/posts", posts::router())
}
