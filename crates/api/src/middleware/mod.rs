//! Request middleware and session extractors.
//!
//! - [`session::session_gate`] -- Resolves the session once per request and
//!   redirects protected and auth pages.
//! - [`auth::AuthUser`] -- Extractor for handlers that require a session.

pub mod auth;
pub mod session;
