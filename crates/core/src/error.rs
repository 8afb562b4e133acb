use crate::types::DbId;

/// Domain-level failures shared by every layer above the store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input that is well-formed but refers to something unusable, such
    /// as a tag id with no row behind it.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request collides with existing state (an email already taken).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No session, or the presented credentials were rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not the owner of the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}
