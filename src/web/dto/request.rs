//! Request DTOs for the HTTP layer.

use serde::Deserialize;
use validator::Validate;

use crate::auth::RegistrationRequest;
use crate::blog::{CommentInput, PageRequest, PostInput};

// ============================================================================
// Auth DTOs
// ============================================================================

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(req: RegisterRequest) -> Self {
        RegistrationRequest::new(req.name, req.email, req.password)
    }
}

// ============================================================================
// Blog DTOs
// ============================================================================

/// Submitted post form. Missing fields are treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    /// Post title.
    #[serde(default)]
    pub title: String,
    /// Post body.
    #[serde(default)]
    pub body: String,
}

impl From<PostForm> for PostInput {
    fn from(form: PostForm) -> Self {
        PostInput::new(form.title, form.body)
    }
}

/// Submitted comment form.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    /// Comment text.
    #[serde(default)]
    pub body: String,
}

impl From<CommentForm> for CommentInput {
    fn from(form: CommentForm) -> Self {
        CommentInput::new(form.body)
    }
}

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Resolve against a default page size, capping `per_page` at `max_per_page`.
    pub fn to_page_request(&self, default_per_page: u32, max_per_page: u32) -> PageRequest {
        let per_page = self
            .per_page
            .unwrap_or(default_per_page)
            .min(max_per_page.max(1));
        PageRequest::new(self.page.unwrap_or(1), per_page)
    }
}
