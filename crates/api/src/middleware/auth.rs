//! Extractor for handlers that require a signed-in user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use inkpost_core::error::CoreError;
use inkpost_core::types::DbId;

use crate::error::AppError;
use crate::middleware::session::SessionContext;
use crate::state::AppState;

/// Authenticated user of the current request.
///
/// Reads the [`SessionContext`] attached by the session middleware, or
/// resolves one from the headers when the middleware did not run. Rejects
/// with 401 when there is no valid session.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = match parts.extensions.get::<SessionContext>() {
            Some(session) => session.clone(),
            None => SessionContext::from_headers(&parts.headers, &state.config.jwt),
        };

        let user = session.user.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing or invalid session".into(),
            ))
        })?;

        Ok(AuthUser {
            user_id: user.user_id,
            email: user.email,
        })
    }
}
