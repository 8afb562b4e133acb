//! Route definitions for the `/posts` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`. All require auth.
///
/// ```text
/// GET    /            -> list_posts (?category_id=&tag_ids=&q=)
/// POST   /            -> create_post
/// GET    /{id}        -> get_post
/// PUT    /{id}        -> update_post
/// DELETE /{id}        -> delete_post
/// PUT    /{id}/tags   -> link_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/tags", put(posts::link_tags))
}
