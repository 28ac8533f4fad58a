//! Article service
//!
//! Business logic for articles and their comment threads. Ownership rules
//! live here: only an article's author may update or delete it.

use std::sync::Arc;

use crate::db::repositories::{ArticleRepository, CommentRepository};
use crate::models::{
    Article, Comment, CommentWithAuthor, CreateArticleInput, CreateCommentInput,
    UpdateArticleInput, User,
};

/// Error types for article service operations
#[derive(Debug, thiserror::Error)]
pub enum ArticleServiceError {
    /// Article not found
    #[error("Article not found: {0}")]
    NotFound(i64),

    /// The acting user does not own the article
    #[error("Permission denied for article {0}")]
    PermissionDenied(i64),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Article service
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { articles, comments }
    }

    /// Create an article authored by `author`
    pub async fn create(
        &self,
        input: CreateArticleInput,
        author: &User,
    ) -> Result<Article, ArticleServiceError> {
        if input.title.trim().is_empty() {
            return Err(ArticleServiceError::ValidationError(
                "Title must not be empty".into(),
            ));
        }
        if input.body.trim().is_empty() {
            return Err(ArticleServiceError::ValidationError(
                "Body must not be empty".into(),
            ));
        }

        let article = self.articles.create(&input, author.id).await?;
        tracing::debug!(article_id = article.id, "Article created");
        Ok(article)
    }

    /// Get an article, erroring when missing
    pub async fn get(&self, id: i64) -> Result<Article, ArticleServiceError> {
        self.articles
            .get_by_id(id)
            .await?
            .ok_or(ArticleServiceError::NotFound(id))
    }

    /// List all articles, newest first
    pub async fn list(&self) -> Result<Vec<Article>, ArticleServiceError> {
        Ok(self.articles.list().await?)
    }

    /// Update an article. Only its author may do so.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateArticleInput,
        acting_user: &User,
    ) -> Result<Article, ArticleServiceError> {
        let article = self.get(id).await?;
        if !acting_user.owns(article.author_id) {
            return Err(ArticleServiceError::PermissionDenied(id));
        }
        if matches!(&input.title, Some(t) if t.trim().is_empty()) {
            return Err(ArticleServiceError::ValidationError(
                "Title must not be empty".into(),
            ));
        }
        if !input.has_changes() {
            return Ok(article);
        }

        self.articles
            .update(id, &input)
            .await?
            .ok_or(ArticleServiceError::NotFound(id))
    }

    /// Delete an article. Only its author may do so.
    pub async fn delete(&self, id: i64, acting_user: &User) -> Result<(), ArticleServiceError> {
        let article = self.get(id).await?;
        if !acting_user.owns(article.author_id) {
            return Err(ArticleServiceError::PermissionDenied(id));
        }

        self.articles.delete(id).await?;
        tracing::debug!(article_id = id, "Article deleted");
        Ok(())
    }

    /// Add a comment to an article on behalf of `user`
    pub async fn add_comment(
        &self,
        input: CreateCommentInput,
        user: &User,
    ) -> Result<Comment, ArticleServiceError> {
        if input.body.trim().is_empty() {
            return Err(ArticleServiceError::ValidationError(
                "Comment must not be empty".into(),
            ));
        }
        // The article must exist before a comment can reference it
        self.get(input.article_id).await?;

        Ok(self.comments.create(&input, user.id).await?)
    }

    /// Comments on an article, oldest first
    pub async fn comments(&self, article_id: i64) -> Result<Vec<CommentWithAuthor>, ArticleServiceError> {
        Ok(self.comments.get_by_article(article_id).await?)
    }
}
