//! Response DTOs for the HTTP layer.

use serde::Serialize;

use crate::auth::{can_delete_comment, can_delete_post, can_update_post, Actor};
use crate::blog::{CommentWithAuthor, Paginated, PostWithAuthor};
use crate::db::User;

use super::FormView;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Build a response from a page of domain items.
    pub fn from_page<U>(page: Paginated<U>, f: impl FnMut(U) -> T) -> Self {
        let meta = PaginationMeta {
            page: page.page,
            per_page: page.per_page,
            total: page.total.max(0) as u64,
            last_page: page.last_page(),
            has_more: page.has_more(),
        };
        Self {
            data: page.items.into_iter().map(f).collect(),
            meta,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Number of the last page.
    pub last_page: u32,
    /// Whether pages follow this one.
    pub has_more: bool,
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Token response for login and registration.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// User information.
    pub user: UserInfo,
}

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Blog DTOs
// ============================================================================

/// Author information.
#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Post in list and detail views.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Body as written.
    pub body: String,
    /// Body as sanitized HTML.
    pub rendered_body: String,
    /// Author.
    pub author: AuthorInfo,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(p: PostWithAuthor) -> Self {
        let post = p.post;
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            rendered_body: post.rendered_body,
            author: AuthorInfo {
                id: post.author_id,
                name: p.author_name,
            },
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

/// Comment in the post detail view.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// Comment ID.
    pub id: i64,
    /// Post ID.
    pub post_id: i64,
    /// Comment text.
    pub body: String,
    /// Author.
    pub author: AuthorInfo,
    /// Creation timestamp.
    pub created_at: String,
    /// Whether the requesting user may delete this comment.
    pub can_delete: bool,
}

impl CommentResponse {
    /// Build the response for the given viewer.
    pub fn for_viewer(c: CommentWithAuthor, viewer: Option<&Actor>) -> Self {
        let can_delete = viewer.is_some_and(|actor| can_delete_comment(actor, &c.comment));
        let comment = c.comment;
        Self {
            id: comment.id,
            post_id: comment.post_id,
            body: comment.body,
            author: AuthorInfo {
                id: comment.author_id,
                name: c.author_name,
            },
            created_at: comment.created_at.to_rfc3339(),
            can_delete,
        }
    }
}

/// Post detail view: the post, one page of its comments and the comment form.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    /// The post.
    pub post: PostResponse,
    /// Whether the requesting user may edit the post.
    pub can_update: bool,
    /// Whether the requesting user may delete the post.
    pub can_delete: bool,
    /// One page of comments, newest first.
    pub comments: PaginatedResponse<CommentResponse>,
    /// Comment form (only for authenticated users).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_form: Option<FormView>,
    /// Token to echo in the `x-csrf-token` header.
    pub csrf_token: String,
}

impl PostDetailResponse {
    /// Build the detail view for the given viewer.
    pub fn new(
        post: PostWithAuthor,
        comments: Paginated<CommentWithAuthor>,
        viewer: Option<&Actor>,
        csrf_token: String,
    ) -> Self {
        let can_update = viewer.is_some_and(|actor| can_update_post(actor, &post.post));
        let can_delete = viewer.is_some_and(|actor| can_delete_post(actor, &post.post));
        let comment_form = viewer.map(|_| {
            FormView::comment(post.post.id, "").with_csrf_token(Some(csrf_token.clone()))
        });
        Self {
            post: post.into(),
            can_update,
            can_delete,
            comments: PaginatedResponse::from_page(comments, |c| {
                CommentResponse::for_viewer(c, viewer)
            }),
            comment_form,
            csrf_token,
        }
    }
}
