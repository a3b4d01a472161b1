//! Router configuration for the HTTP layer.

use axum::{
    http::{header::CACHE_CONTROL, HeaderValue},
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::WebConfig;

use super::handlers::{
    create_comment, create_post, delete_comment, delete_post, edit_post_form, list_posts, login,
    me, new_post_form, register, show_post, update_post, AppState,
};
use super::middleware::{create_cors_layer, csrf_guard, jwt_auth, security_headers, JwtState};

/// Create the main router.
///
/// `/posts` routes are guarded against cross-site request forgery (when
/// enabled in the config); `/api/auth` routes take bearer-token clients only
/// and are not.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    web_config: &WebConfig,
) -> Router {
    let csrf_enabled = web_config.csrf_protection;

    let blog_routes = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/new", get(new_post_form))
        .route(
            "/posts/:id",
            get(show_post).put(update_post).delete(delete_post),
        )
        .route("/posts/:id/edit", get(edit_post_form))
        .route("/posts/:id/comments", post(create_comment))
        .route("/posts/:id/comments/:comment_id", delete(delete_comment))
        .layer(middleware::from_fn(move |req, next| {
            csrf_guard(csrf_enabled, req, next)
        }));

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me));

    Router::new()
        .merge(blog_routes)
        .nest("/api/auth", auth_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&web_config.cors_origins))
                .layer(middleware::from_fn(security_headers))
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-store, max-age=0"),
                ))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
