//! Comment repository for Quill.

use chrono::Utc;

use super::comment::{Comment, CommentWithAuthor, NewComment};
use super::pagination::{PageRequest, Paginated};
use crate::db::DbPool;
use crate::{QuillError, Result};

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new comment.
    ///
    /// The post's existence is checked in the same statement as the insert,
    /// so a post deleted concurrently yields `NotFound`.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (post_id, author_id, body, created_at)
             SELECT $1, $2, $3, $4
             WHERE EXISTS (SELECT 1 FROM posts WHERE id = $1)
             RETURNING id, post_id, author_id, body, created_at",
        )
        .bind(new_comment.post_id)
        .bind(new_comment.author_id)
        .bind(&new_comment.body)
        .bind(Utc::now())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?
        .ok_or_else(|| QuillError::NotFound("post".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author_id, body, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(comment)
    }

    /// List a post's comments newest first, with author names.
    pub async fn list_by_post_paginated(
        &self,
        post_id: i64,
        page: PageRequest,
    ) -> Result<Paginated<CommentWithAuthor>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.post_id, c.author_id, c.body, c.created_at, u.name AS author_name
             FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.post_id = $1
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(post_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        let total = self.count_by_post(post_id).await?;
        Ok(Paginated::new(comments, total, page))
    }

    /// Count comments on a post.
    pub async fn count_by_post(&self, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Delete a comment by ID.
    ///
    /// Returns true if the comment was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}
