//! Per-request session resolution and page redirects.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use inkpost_core::routes;
use inkpost_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::state::AppState;

/// Name of the cookie that carries the access token.
pub const SESSION_COOKIE: &str = "session";

/// The authenticated user behind a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: DbId,
    pub email: String,
}

/// Session state of one request.
///
/// Built by [`session_gate`], stored in the request extensions, and dropped
/// with the request.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<SessionUser>,
}

impl SessionContext {
    /// Resolve the session from a Bearer token, falling back to the
    /// `session` cookie. Invalid or expired tokens count as no session.
    pub fn from_headers(headers: &HeaderMap, jwt: &JwtConfig) -> Self {
        let Some(token) = bearer_token(headers).or_else(|| cookie_token(headers)) else {
            return Self::default();
        };

        match validate_token(&token, jwt) {
            Ok(claims) => Self {
                user: Some(SessionUser {
                    user_id: claims.sub,
                    email: claims.email,
                }),
            },
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
                Self::default()
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Middleware run on every request.
///
/// Redirects (307) unauthenticated visitors of protected pages to the login
/// page and authenticated visitors of the auth pages to the home page.
/// Everything else continues with a [`SessionContext`] attached.
pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = SessionContext::from_headers(request.headers(), &state.config.jwt);
    let path = request.uri().path();
    let decision = routes::decide(path, session.is_authenticated());

    if let Some(location) = decision.location() {
        tracing::debug!(path, location, ?decision, "Session redirect");
        return Redirect::temporary(location).into_response();
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    use super::*;
    use crate::auth::jwt::generate_access_token;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "session-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    fn headers(name: axum::http::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn no_credentials_is_anonymous() {
        let ctx = SessionContext::from_headers(&HeaderMap::new(), &jwt());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn bearer_token_resolves_user() {
        let token = generate_access_token(5, "a@example.com", &jwt()).unwrap();
        let ctx =
            SessionContext::from_headers(&headers(AUTHORIZATION, &format!("Bearer {token}")), &jwt());
        assert_eq!(
            ctx.user,
            Some(SessionUser {
                user_id: 5,
                email: "a@example.com".to_string()
            })
        );
    }

    #[test]
    fn session_cookie_resolves_user() {
        let token = generate_access_token(9, "b@example.com", &jwt()).unwrap();
        let ctx = SessionContext::from_headers(
            &headers(COOKIE, &format!("theme=dark; session={token}")),
            &jwt(),
        );
        assert_eq!(ctx.user.map(|u| u.user_id), Some(9));
    }

    #[test]
    fn invalid_token_is_anonymous() {
        let ctx = SessionContext::from_headers(&headers(COOKIE, "session=garbage"), &jwt());
        assert!(!ctx.is_authenticated());
    }
}
