//! Comment handlers.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::blog::{CommentInput, CommentService};
use crate::web::dto::{CommentForm, FormView, JsonBody};
use crate::web::error::ApiError;
use crate::web::handlers::{reject_with_form, AppState};
use crate::web::middleware::csrf::current_token;
use crate::web::middleware::AuthUser;

fn comments_anchor(post_id: i64) -> String {
    format!("/posts/{}#comments", post_id)
}

/// POST /posts/:id/comments - Add a comment, then return to the post.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(post_id): Path<i64>,
    jar: CookieJar,
    JsonBody(form): JsonBody<CommentForm>,
) -> Result<Redirect, ApiError> {
    let input = CommentInput::from(form);
    CommentService::new(&state.db)
        .create_comment(&auth.actor(), post_id, &input)
        .await
        .map_err(|e| {
            reject_with_form(e, || {
                FormView::comment(post_id, &input.body).with_csrf_token(current_token(&jar))
            })
        })?;

    Ok(Redirect::to(&comments_anchor(post_id)))
}

/// DELETE /posts/:id/comments/:comment_id - Delete a comment (its author only).
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<Redirect, ApiError> {
    CommentService::new(&state.db)
        .delete_comment(&auth.actor(), post_id, comment_id)
        .await?;

    Ok(Redirect::to(&comments_anchor(post_id)))
}
