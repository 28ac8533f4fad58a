//! Post service
//!
//! Business logic for blog posts, shared by the HTML views and the JSON
//! API.

use std::sync::Arc;

use crate::db::repositories::PostRepository;
use crate::models::{CreatePostInput, Post, UpdatePostInput};

/// Error types for post service operations
#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    /// Post not found
    #[error("Post not found: {0}")]
    NotFound(i64),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Post service
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post authored by `author_id`
    pub async fn create(
        &self,
        input: CreatePostInput,
        author_id: i64,
    ) -> Result<Post, PostServiceError> {
        if input.title.trim().is_empty() {
            return Err(PostServiceError::ValidationError(
                "Title must not be empty".into(),
            ));
        }
        if input.body.trim().is_empty() {
            return Err(PostServiceError::ValidationError(
                "Body must not be empty".into(),
            ));
        }

        let post = self.repo.create(&input, author_id).await?;
        tracing::debug!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Get a post, erroring when missing
    pub async fn get(&self, id: i64) -> Result<Post, PostServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(PostServiceError::NotFound(id))
    }

    /// List all posts, newest first
    pub async fn list(&self) -> Result<Vec<Post>, PostServiceError> {
        Ok(self.repo.list().await?)
    }

    /// Update a post's title and/or body
    pub async fn update(
        &self,
        id: i64,
        input: UpdatePostInput,
    ) -> Result<Post, PostServiceError> {
        if matches!(&input.title, Some(t) if t.trim().is_empty()) {
            return Err(PostServiceError::ValidationError(
                "Title must not be empty".into(),
            ));
        }
        if !input.has_changes() {
            return self.get(id).await;
        }

        self.repo
            .update(id, &input)
            .await?
            .ok_or(PostServiceError::NotFound(id))
    }

    /// Delete a post
    pub async fn delete(&self, id: i64) -> Result<(), PostServiceError> {
        if !self.repo.delete(id).await? {
            return Err(PostServiceError::NotFound(id));
        }
        tracing::debug!(post_id = id, "Post deleted");
        Ok(())
    }
}
