//! Comment repository
//!
//! Database operations for article comments.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{Comment, CommentWithAuthor, CreateCommentInput};

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a new comment and return it with its assigned ID
    async fn create(&self, input: &CreateCommentInput, user_id: i64) -> Result<Comment>;

    /// Get a comment by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>>;

    /// Get comments for an article, oldest first, joined with author info
    async fn get_by_article(&self, article_id: i64) -> Result<Vec<CommentWithAuthor>>;

    /// Delete a comment
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: DbPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use behind the trait
    pub fn boxed(pool: DbPool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, input: &CreateCommentInput, user_id: i64) -> Result<Comment> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"INSERT INTO comments (article_id, user_id, body, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(input.article_id)
        .bind(user_id)
        .bind(&input.body)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to insert comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            article_id: input.article_id,
            user_id,
            body: input.body.clone(),
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch comment")?;

        Ok(row.map(|r| Comment {
            id: r.get("id"),
            article_id: r.get("article_id"),
            user_id: r.get("user_id"),
            body: r.get("body"),
            created_at: r.get("created_at"),
        }))
    }

    async fn get_by_article(&self, article_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.article_id, c.user_id, c.body, c.created_at,
                      u.username, u.email
               FROM comments c
               JOIN users u ON c.user_id = u.id
               WHERE c.article_id = ?
               ORDER BY c.created_at ASC, c.id ASC"#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch article comments")?;

        Ok(rows
            .iter()
            .map(|r| {
                let email: String = r.get("email");
                CommentWithAuthor {
                    id: r.get("id"),
                    article_id: r.get("article_id"),
                    user_id: r.get("user_id"),
                    username: r.get("username"),
                    body: r.get("body"),
                    created_at: r.get("created_at"),
                    avatar_url: CommentWithAuthor::gravatar_url(&email),
                }
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        ArticleRepository, SqlxArticleRepository, SqlxUserRepository, UserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::{CreateArticleInput, User};

    async fn setup() -> (DbPool, SqlxCommentRepository, i64, i64) {
        let pool = create_test_pool().await.expect("test pool");
        migrations::run_migrations(&pool).await.expect("migrations");

        let users = SqlxUserRepository::new(pool.clone());
        let user = users
            .create(&User::new(
                "commenter".into(),
                "commenter@example.com".into(),
                "hash".into(),
                None,
            ))
            .await
            .expect("user");

        let articles = SqlxArticleRepository::new(pool.clone());
        let article = articles
            .create(
                &CreateArticleInput {
                    title: "Article".into(),
                    body: "Body".into(),
                },
                user.id,
            )
            .await
            .expect("article");

        (pool.clone(), SqlxCommentRepository::new(pool), article.id, user.id)
    }

    #[tokio::test]
    async fn test_create_and_list_comments() {
        let (_pool, repo, article_id, user_id) = setup().await;

        repo.create(
            &CreateCommentInput {
                article_id,
                body: "First!".into(),
            },
            user_id,
        )
        .await
        .expect("create");

        let comments = repo.get_by_article(article_id).await.expect("list");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "First!");
        assert_eq!(comments[0].username, "commenter");
        assert!(comments[0].avatar_url.contains("gravatar.com"));
    }

    #[tokio::test]
    async fn test_comments_cascade_on_article_delete() {
        let (pool, repo, article_id, user_id) = setup().await;

        let comment = repo
            .create(
                &CreateCommentInput {
                    article_id,
                    body: "Soon gone".into(),
                },
                user_id,
            )
            .await
            .expect("create");

        sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(article_id)
            .execute(&pool)
            .await
            .expect("delete article");

        assert!(repo.get_by_id(comment.id).await.expect("fetch").is_none());
    }
}
