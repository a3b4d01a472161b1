//! Post handlers.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::blog::{CommentService, PostInput, PostService};
use crate::web::dto::{
    ApiResponse, FormView, JsonBody, PageQuery, PaginatedResponse, PostDetailResponse, PostForm,
    PostResponse, QueryParams,
};
use crate::web::error::ApiError;
use crate::web::handlers::{reject_with_form, AppState};
use crate::web::middleware::csrf::{current_token, issue_token};
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// GET /posts - List posts, newest first.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<PaginatedResponse<PostResponse>>, ApiError> {
    let page = query.to_page_request(state.blog.posts_per_page, state.blog.max_per_page);
    let posts = PostService::new(&state.db).list_posts(page).await?;

    Ok(Json(PaginatedResponse::from_page(posts, PostResponse::from)))
}

/// GET /posts/new - Create form.
pub async fn new_post_form(
    _auth: AuthUser,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<FormView>>) {
    let (jar, token) = issue_token(jar);
    let form = FormView::create_post(None).with_csrf_token(Some(token));
    (jar, Json(ApiResponse::new(form)))
}

/// POST /posts - Create a post, then redirect to it.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    jar: CookieJar,
    JsonBody(form): JsonBody<PostForm>,
) -> Result<Redirect, ApiError> {
    let input = PostInput::from(form);
    let post = PostService::new(&state.db)
        .create_post(&auth.actor(), &input)
        .await
        .map_err(|e| {
            reject_with_form(e, || {
                FormView::create_post(Some(&input)).with_csrf_token(current_token(&jar))
            })
        })?;

    Ok(Redirect::to(&format!("/posts/{}", post.id)))
}

/// GET /posts/:id - Post with one page of comments.
pub async fn show_post(
    State(state): State<Arc<AppState>>,
    auth: OptionalAuthUser,
    Path(id): Path<i64>,
    QueryParams(query): QueryParams<PageQuery>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<PostDetailResponse>>), ApiError> {
    let post = PostService::new(&state.db).get_post(id).await?;

    let page = query.to_page_request(state.blog.comments_per_page, state.blog.max_per_page);
    let comments = CommentService::new(&state.db)
        .list_comments(id, page)
        .await?;

    let (jar, token) = issue_token(jar);
    let viewer = auth.actor();
    let detail = PostDetailResponse::new(post, comments, viewer.as_ref(), token);
    Ok((jar, Json(ApiResponse::new(detail))))
}

/// GET /posts/:id/edit - Edit form (author only).
pub async fn edit_post_form(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<FormView>>), ApiError> {
    let post = PostService::new(&state.db)
        .edit_post(&auth.actor(), id)
        .await?;

    let (jar, token) = issue_token(jar);
    let form = FormView::edit_post(&post).with_csrf_token(Some(token));
    Ok((jar, Json(ApiResponse::new(form))))
}

/// PUT /posts/:id - Update a post (author only), then redirect to it.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<i64>,
    jar: CookieJar,
    JsonBody(form): JsonBody<PostForm>,
) -> Result<Redirect, ApiError> {
    let input = PostInput::from(form);
    PostService::new(&state.db)
        .update_post(&auth.actor(), id, &input)
        .await
        .map_err(|e| {
            reject_with_form(e, || {
                FormView::edit_post_with(id, &input).with_csrf_token(current_token(&jar))
            })
        })?;

    Ok(Redirect::to(&format!("/posts/{}", id)))
}

/// DELETE /posts/:id - Delete a post and its comments (author only).
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    PostService::new(&state.db)
        .delete_post(&auth.actor(), id)
        .await?;

    Ok(Redirect::to("/posts"))
}
