//! Security headers middleware.

use axum::{
    body::Body,
    http::{header::HeaderValue, HeaderName, Request},
    middleware::Next,
    response::Response,
};

/// Headers set on every response. Responses are JSON, so nothing may be
/// framed, sniffed or loaded from them.
const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
];

/// Add the security headers to the response.
///
/// Strict-Transport-Security belongs at the reverse proxy, which terminates TLS.
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        );
    }

    response
}
