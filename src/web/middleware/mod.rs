//! Middleware for the HTTP layer.

pub mod auth;
pub mod cors;
pub mod csrf;
pub mod security;

pub use auth::{jwt_auth, AuthUser, JwtClaims, JwtState, OptionalAuthUser};
pub use cors::create_cors_layer;
pub use csrf::{csrf_guard, issue_token, CSRF_COOKIE, CSRF_HEADER};
pub use security::security_headers;
