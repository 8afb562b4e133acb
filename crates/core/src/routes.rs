//! Route gating rules applied by the session middleware.
//!
//! The lists are hand-maintained prefixes. Matching is a plain
//! `starts_with`, so `/posts/new/draft` is protected too.

/// Pages that require an active session.
pub const PROTECTED_ROUTES: &[&str] = &["/dashboard", "/profile", "/posts/new"];

/// Pages that only make sense without a session (login, signup).
pub const AUTH_ROUTES: &[&str] = &["/auth/login", "/auth/signup"];

/// Where unauthenticated visitors of a protected page are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Where authenticated visitors of an auth page are sent.
pub const HOME_PATH: &str = "/";

/// Outcome of evaluating one request against the route lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Hand the request to the router untouched.
    PassThrough,
    /// Redirect to [`LOGIN_PATH`].
    RedirectToLogin,
    /// Redirect to [`HOME_PATH`].
    RedirectToHome,
}

impl RouteDecision {
    /// Redirect target, or `None` for [`RouteDecision::PassThrough`].
    pub fn location(self) -> Option<&'static str> {
        match self {
            RouteDecision::PassThrough => None,
            RouteDecision::RedirectToLogin => Some(LOGIN_PATH),
            RouteDecision::RedirectToHome => Some(HOME_PATH),
        }
    }
}

/// Whether `path` falls under one of the protected prefixes.
pub fn is_protected_route(path: &str) -> bool {
    PROTECTED_ROUTES.iter().any(|route| path.starts_with(route))
}

/// Whether `path` falls under one of the auth-page prefixes.
pub fn is_auth_route(path: &str) -> bool {
    AUTH_ROUTES.iter().any(|route| path.starts_with(route))
}

/// Decide what to do with a request for `path`.
///
/// Evaluated once per request. The protected check wins when a path would
/// match both lists, although the shipped lists never overlap.
pub fn decide(path: &str, has_session: bool) -> RouteDecision {
    if is_protected_route(path) && !has_session {
        return RouteDecision::RedirectToLogin;
    }
    if is_auth_route(path) && has_session {
        return RouteDecision::RedirectToHome;
    }
    RouteDecision::PassThrough
}
