//! Article model
//!
//! Articles are like posts but carry a comment thread, and only their
//! author may edit or delete them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique identifier
    pub id: i64,
    /// Article title
    pub title: String,
    /// Article body text
    pub body: String,
    /// Author user ID
    pub author_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new article
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleInput {
    pub title: String,
    pub body: String,
}

/// Input for updating an existing article
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticleInput {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl UpdateArticleInput {
    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.body.is_some()
    }
}
