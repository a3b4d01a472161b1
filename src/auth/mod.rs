//! Authentication and authorization module for Quill.
//!
//! This module provides password hashing, user registration and login, and
//! the ownership rules that decide who may change a post or comment.

mod password;
pub mod permission;
mod registration;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use permission::{
    authorize, can_delete_comment, can_delete_post, can_update_post, is_owner, Actor, Owned,
};
pub use registration::{authenticate, register, RegistrationRequest};
