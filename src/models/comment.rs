//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity; belongs to an article and a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's username, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub avatar_url: String,
}

impl CommentWithAuthor {
    /// Generate a Gravatar URL from an email address
    pub fn gravatar_url(email: &str) -> String {
        if email.is_empty() {
            return "https://www.gravatar.com/avatar/?d=mp&s=80".to_string();
        }
        let hash = format!("{:x}", md5::compute(email.trim().to_lowercase()));
        format!("https://www.gravatar.com/avatar/{}?d=mp&s=80", hash)
    }
}

/// Input for creating a comment
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentInput {
    pub article_id: i64,
    pub body: String,
}
