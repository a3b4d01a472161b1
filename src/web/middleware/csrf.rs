//! CSRF protection using the double-submit cookie pattern.
//!
//! Form views hand out a random token in the `csrf_token` cookie and in the
//! response body. State-changing requests must echo it in the `x-csrf-token`
//! header; a cross-site page can make the browser send the cookie but cannot
//! read it to set the header.

use axum::{
    body::Body,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::web::error::{ApiError, ErrorCode};

/// Cookie holding the token.
pub const CSRF_COOKIE: &str = "csrf_token";

/// Header the client echoes the token in.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Return the request's token, creating and setting a new one if absent.
pub fn issue_token(jar: CookieJar) -> (CookieJar, String) {
    if let Some(existing) = jar.get(CSRF_COOKIE) {
        if !existing.value().is_empty() {
            let token = existing.value().to_string();
            return (jar, token);
        }
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .path("/")
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), token)
}

/// The token already held by the client, if any.
pub fn current_token(jar: &CookieJar) -> Option<String> {
    jar.get(CSRF_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Reject state-changing requests whose header token does not match the cookie.
pub async fn csrf_guard(enabled: bool, request: Request<Body>, next: Next) -> Response {
    if !enabled || !is_state_changing(request.method()) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let header = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok());
    let valid = match (current_token(&jar), header) {
        (Some(cookie), Some(header)) => constant_time_eq(cookie.as_bytes(), header.as_bytes()),
        _ => false,
    };

    if valid {
        return next.run(request).await;
    }

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        "CSRF token mismatch"
    );
    ApiError::new(ErrorCode::CsrfTokenMismatch, "CSRF token mismatch").into_response()
}
