//! Comment model for Quill.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::validation::not_empty_trimmed;

/// Maximum length for comment bodies (in characters).
pub const MAX_COMMENT_LENGTH: usize = 255;

/// Comment entity, always attached to one post.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// ID of the post this comment belongs to.
    pub post_id: i64,
    /// ID of the user who wrote the comment.
    pub author_id: i64,
    /// Comment text.
    pub body: String,
    /// Comment creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's display name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub author_name: String,
}

/// Body submitted through the comment form.
#[derive(Debug, Clone, Default, Validate)]
pub struct CommentInput {
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 255)
    )]
    pub body: String,
}

impl CommentInput {
    /// Create a new comment input with surrounding whitespace stripped.
    pub fn new(body: impl AsRef<str>) -> Self {
        Self {
            body: body.as_ref().trim().to_string(),
        }
    }
}

/// Data for inserting a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// ID of the post.
    pub post_id: i64,
    /// ID of the author.
    pub author_id: i64,
    /// Comment text.
    pub body: String,
}

impl NewComment {
    /// Create a new comment with required fields.
    pub fn new(post_id: i64, author_id: i64, body: impl Into<String>) -> Self {
        Self {
            post_id,
            author_id,
            body: body.into(),
        }
    }
}
