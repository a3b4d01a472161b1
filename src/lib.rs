//! Quill - a small blog with posts and comments.
//!
//! Authenticated users write posts; anyone may read them. Other users attach
//! comments, and only the author of a post or comment may remove it.

pub mod auth;
pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod seed;
pub mod validation;
pub mod web;

pub use auth::{
    authenticate, hash_password, register, validate_password, verify_password, Actor,
    PasswordError, RegistrationRequest,
};
pub use blog::{
    render_body, Comment, CommentInput, CommentService, PageRequest, Paginated, Post, PostInput,
    PostService,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{FieldErrors, QuillError, Result};
pub use web::WebServer;
