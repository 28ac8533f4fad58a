//! Article repository
//!
//! Database operations for articles.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{Article, CreateArticleInput, UpdateArticleInput};

/// Article repository trait
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert a new article and return it with its assigned ID
    async fn create(&self, input: &CreateArticleInput, author_id: i64) -> Result<Article>;

    /// Get an article by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Article>>;

    /// List all articles, newest first
    async fn list(&self) -> Result<Vec<Article>>;

    /// Apply the given changes; returns the updated article, or None if missing
    async fn update(&self, id: i64, input: &UpdateArticleInput) -> Result<Option<Article>>;

    /// Delete an article
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based article repository implementation
pub struct SqlxArticleRepository {
    pool: DbPool,
}

impl SqlxArticleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use behind the trait
    pub fn boxed(pool: DbPool) -> Arc<dyn ArticleRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn create(&self, input: &CreateArticleInput, author_id: i64) -> Result<Article> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO articles (title, body, author_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&input.title)
        .bind(&input.body)
        .bind(author_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to insert article")?;

        Ok(Article {
            id: result.last_insert_rowid(),
            title: input.title.clone(),
            body: input.body.clone(),
            author_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch article")?;
        Ok(row.map(|r| row_to_article(&r)))
    }

    async fn list(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT * FROM articles ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list articles")?;
        Ok(rows.iter().map(row_to_article).collect())
    }

    async fn update(&self, id: i64, input: &UpdateArticleInput) -> Result<Option<Article>> {
        let Some(mut article) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            article.title = title.clone();
        }
        if let Some(body) = &input.body {
            article.body = body.clone();
        }
        article.updated_at = Utc::now();

        sqlx::query("UPDATE articles SET title = ?, body = ?, updated_at = ? WHERE id = ?")
            .bind(&article.title)
            .bind(&article.body)
            .bind(article.updated_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update article")?;

        Ok(Some(article))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete article")?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
