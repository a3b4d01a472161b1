//! Blog module for Quill.
//!
//! This module provides posts and their comments:
//! - Post creation, editing and deletion (author only)
//! - Comments scoped to a post (deletion by the comment's author only)
//! - Newest-first pagination with author names attached
//! - Body rendering to sanitized HTML

pub mod comment;
mod comment_repository;
pub mod pagination;
pub mod post;
mod post_repository;
pub mod render;
mod service;

pub use comment::{Comment, CommentInput, CommentWithAuthor, NewComment, MAX_COMMENT_LENGTH};
pub use comment_repository::CommentRepository;
pub use pagination::{PageRequest, Paginated};
pub use post::{NewPost, Post, PostInput, PostUpdate, PostWithAuthor, MAX_TITLE_LENGTH};
pub use post_repository::PostRepository;
pub use render::render_body;
pub use service::{CommentService, PostService};
