//! Post repository
//!
//! Database operations for blog posts.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{CreatePostInput, Post, UpdatePostInput};

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post and return it with its assigned ID
    async fn create(&self, input: &CreatePostInput, author_id: i64) -> Result<Post>;

    /// Get a post by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Post>>;

    /// List all posts, newest first
    async fn list(&self) -> Result<Vec<Post>>;

    /// Apply the given changes; returns the updated post, or None if missing
    async fn update(&self, id: i64, input: &UpdatePostInput) -> Result<Option<Post>>;

    /// Delete a post
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based post repository implementation
pub struct SqlxPostRepository {
    pool: DbPool,
}

impl SqlxPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use behind the trait
    pub fn boxed(pool: DbPool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, input: &CreatePostInput, author_id: i64) -> Result<Post> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO posts (title, body, author_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&input.title)
        .bind(&input.body)
        .bind(author_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to insert post")?;

        Ok(Post {
            id: result.last_insert_rowid(),
            title: input.title.clone(),
            body: input.body.clone(),
            author_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch post")?;
        Ok(row.map(|r| row_to_post(&r)))
    }

    async fn list(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query("SELECT * FROM posts ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list posts")?;
        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn update(&self, id: i64, input: &UpdatePostInput) -> Result<Option<Post>> {
        let Some(mut post) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            post.title = title.clone();
        }
        if let Some(body) = &input.body {
            post.body = body.clone();
        }
        post.updated_at = Utc::now();

        sqlx::query("UPDATE posts SET title = ?, body = ?, updated_at = ? WHERE id = ?")
            .bind(&post.title)
            .bind(&post.body)
            .bind(post.updated_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update post")?;

        Ok(Some(post))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_post(row: &sqlx::sqlite::SqliteRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
