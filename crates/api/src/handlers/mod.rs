pub mod auth;
pub mod categories;
pub mod posts;
pub mod tags;

use inkpost_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Body of the collection-level `DELETE` endpoints (`{"id": 3}`).
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: DbId,
}

/// Body of the collection-level `DELETE` success response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
