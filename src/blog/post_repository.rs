//! Post repository for Quill.
//!
//! This module provides CRUD operations for posts in the database.

use chrono::Utc;

use super::pagination::{PageRequest, Paginated};
use super::post::{NewPost, Post, PostUpdate, PostWithAuthor};
use crate::db::DbPool;
use crate::{QuillError, Result};

const SELECT_WITH_AUTHOR: &str = "SELECT p.id, p.author_id, p.title, p.body, p.rendered_body,
            p.created_at, p.updated_at, u.name AS author_name
     FROM posts p
     JOIN users u ON u.id = p.author_id";

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// `created_at` and `updated_at` are both set to the current time.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let now = Utc::now();
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (author_id, title, body, rendered_body, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, author_id, title, body, rendered_body, created_at, updated_at",
        )
        .bind(new_post.author_id)
        .bind(&new_post.title)
        .bind(&new_post.body)
        .bind(&new_post.rendered_body)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(post)
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, author_id, title, body, rendered_body, created_at, updated_at
             FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(post)
    }

    /// Get a post together with its author's name.
    pub async fn get_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>> {
        let query = format!("{SELECT_WITH_AUTHOR} WHERE p.id = $1");
        let post = sqlx::query_as::<_, PostWithAuthor>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(post)
    }

    /// List posts newest first, with author names.
    ///
    /// Posts created in the same instant are ordered by descending ID.
    pub async fn list_paginated(&self, page: PageRequest) -> Result<Paginated<PostWithAuthor>> {
        let query = format!(
            "{SELECT_WITH_AUTHOR}
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $1 OFFSET $2"
        );
        let posts = sqlx::query_as::<_, PostWithAuthor>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        let total = self.count().await?;
        Ok(Paginated::new(posts, total, page))
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count)
    }

    /// Replace a post's title and body and bump `updated_at`.
    ///
    /// Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "UPDATE posts SET title = $1, body = $2, rendered_body = $3, updated_at = $4
             WHERE id = $5
             RETURNING id, author_id, title, body, rendered_body, created_at, updated_at",
        )
        .bind(&update.title)
        .bind(&update.body)
        .bind(&update.rendered_body)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(post)
    }

    /// Delete a post and all of its comments in one transaction.
    ///
    /// Returns true if the post existed. Either both the comments and the
    /// post are removed or nothing is.
    pub async fn delete_with_comments(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}
