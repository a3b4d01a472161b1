//! Blog services for Quill.
//!
//! High-level post and comment operations with validation and ownership
//! checks. For mutations of existing resources the checks run in a fixed
//! order: existence, then ownership, then input validation.

use tracing::info;

use crate::auth::permission::{
    authorize, can_delete_comment, can_delete_post, can_update_post, Actor,
};
use crate::db::Database;
use crate::validation::check;
use crate::{QuillError, Result};

use super::comment::{Comment, CommentInput, CommentWithAuthor, NewComment};
use super::comment_repository::CommentRepository;
use super::pagination::{PageRequest, Paginated};
use super::post::{NewPost, Post, PostInput, PostUpdate, PostWithAuthor};
use super::post_repository::PostRepository;
use super::render::render_body;

/// Service for post operations.
pub struct PostService<'a> {
    db: &'a Database,
}

impl<'a> PostService<'a> {
    /// Create a new PostService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List posts newest first.
    pub async fn list_posts(&self, page: PageRequest) -> Result<Paginated<PostWithAuthor>> {
        PostRepository::new(self.db.pool()).list_paginated(page).await
    }

    /// Create a post owned by the actor.
    pub async fn create_post(&self, actor: &Actor, input: &PostInput) -> Result<Post> {
        check(input)?;

        let post = PostRepository::new(self.db.pool())
            .create(&NewPost {
                author_id: actor.id,
                title: input.title.clone(),
                body: input.body.clone(),
                rendered_body: render_body(&input.body),
            })
            .await?;

        info!(post_id = post.id, author_id = actor.id, "Post created");
        Ok(post)
    }

    /// Get a post with its author's name.
    pub async fn get_post(&self, id: i64) -> Result<PostWithAuthor> {
        PostRepository::new(self.db.pool())
            .get_with_author(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("post".to_string()))
    }

    /// Get a post for its edit form. Only the author may edit.
    pub async fn edit_post(&self, actor: &Actor, id: i64) -> Result<Post> {
        let post = self.find(id).await?;
        authorize(can_update_post(actor, &post), "update this post")?;
        Ok(post)
    }

    /// Replace a post's title and body.
    ///
    /// Re-renders the body and bumps `updated_at`. `author_id` and
    /// `created_at` are never touched.
    pub async fn update_post(&self, actor: &Actor, id: i64, input: &PostInput) -> Result<Post> {
        let post = self.find(id).await?;
        authorize(can_update_post(actor, &post), "update this post")?;
        check(input)?;

        let update = PostUpdate {
            title: input.title.clone(),
            body: input.body.clone(),
            rendered_body: render_body(&input.body),
        };
        let updated = PostRepository::new(self.db.pool())
            .update(id, &update)
            .await?
            .ok_or_else(|| QuillError::NotFound("post".to_string()))?;

        info!(post_id = id, author_id = actor.id, "Post updated");
        Ok(updated)
    }

    /// Delete a post together with all of its comments.
    pub async fn delete_post(&self, actor: &Actor, id: i64) -> Result<()> {
        let post = self.find(id).await?;
        authorize(can_delete_post(actor, &post), "delete this post")?;

        if !PostRepository::new(self.db.pool())
            .delete_with_comments(id)
            .await?
        {
            return Err(QuillError::NotFound("post".to_string()));
        }

        info!(post_id = id, author_id = actor.id, "Post deleted");
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Post> {
        PostRepository::new(self.db.pool())
            .get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("post".to_string()))
    }
}

/// Service for comment operations, always scoped to a post.
pub struct CommentService<'a> {
    db: &'a Database,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List a post's comments newest first.
    ///
    /// A post without comments, or one that no longer exists, yields an
    /// empty page.
    pub async fn list_comments(
        &self,
        post_id: i64,
        page: PageRequest,
    ) -> Result<Paginated<CommentWithAuthor>> {
        CommentRepository::new(self.db.pool())
            .list_by_post_paginated(post_id, page)
            .await
    }

    /// Add a comment to an existing post.
    pub async fn create_comment(
        &self,
        actor: &Actor,
        post_id: i64,
        input: &CommentInput,
    ) -> Result<Comment> {
        if PostRepository::new(self.db.pool())
            .get_by_id(post_id)
            .await?
            .is_none()
        {
            return Err(QuillError::NotFound("post".to_string()));
        }
        check(input)?;

        let comment = CommentRepository::new(self.db.pool())
            .create(&NewComment::new(post_id, actor.id, input.body.clone()))
            .await?;

        info!(
            comment_id = comment.id,
            post_id,
            author_id = actor.id,
            "Comment created"
        );
        Ok(comment)
    }

    /// Delete a comment. Only the comment's author may do so.
    ///
    /// A comment that exists but belongs to a different post is treated as
    /// missing.
    pub async fn delete_comment(&self, actor: &Actor, post_id: i64, comment_id: i64) -> Result<()> {
        let repo = CommentRepository::new(self.db.pool());
        let comment = repo
            .get_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| QuillError::NotFound("comment".to_string()))?;

        authorize(can_delete_comment(actor, &comment), "delete this comment")?;

        if !repo.delete(comment_id).await? {
            return Err(QuillError::NotFound("comment".to_string()));
        }

        info!(comment_id, post_id, author_id = actor.id, "Comment deleted");
        Ok(())
    }
}
