//! Ownership-based authorization for Quill.
//!
//! Ownership is the only authorization axis: an actor may modify a resource
//! exactly when the resource's `author_id` is the actor's id. There are no
//! roles and no administrator override.

use crate::blog::{Comment, Post};
use crate::{QuillError, Result};

/// The authenticated user performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl Actor {
    /// Create a new actor.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A resource that belongs to a user.
pub trait Owned {
    /// ID of the owning user.
    fn author_id(&self) -> i64;
}

impl Owned for Post {
    fn author_id(&self) -> i64 {
        self.author_id
    }
}

impl Owned for Comment {
    fn author_id(&self) -> i64 {
        self.author_id
    }
}

/// Check whether the actor owns the resource.
pub fn is_owner<R: Owned + ?Sized>(actor: &Actor, resource: &R) -> bool {
    actor.id == resource.author_id()
}

/// Whether the actor may edit the post.
pub fn can_update_post(actor: &Actor, post: &Post) -> bool {
    is_owner(actor, post)
}

/// Whether the actor may delete the post (and with it, its comments).
pub fn can_delete_post(actor: &Actor, post: &Post) -> bool {
    is_owner(actor, post)
}

/// Whether the actor may delete the comment.
///
/// Only the comment's author qualifies; the author of the parent post does not.
pub fn can_delete_comment(actor: &Actor, comment: &Comment) -> bool {
    is_owner(actor, comment)
}

/// Turn a policy decision into a `Forbidden` error.
pub fn authorize(allowed: bool, action: &str) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(QuillError::Forbidden(format!(
            "you are not allowed to {action}"
        )))
    }
}
