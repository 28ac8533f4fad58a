//! Group repository
//!
//! Database operations for groups and the membership junction table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;
use std::sync::Arc;

use crate::db::DbPool;
use crate::models::{Group, Member, Membership};

/// Group repository trait
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Insert a new group and return it with its assigned ID
    async fn create(&self, name: &str) -> Result<Group>;

    /// Get a group by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Group>>;

    /// List all groups, by name
    async fn list(&self) -> Result<Vec<Group>>;

    /// Delete a group
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Insert a membership junction record
    async fn add_membership(
        &self,
        user_id: i64,
        group_id: i64,
        date_joined: NaiveDate,
        invite_reason: &str,
    ) -> Result<Membership>;

    /// Remove a membership; returns false if none existed
    async fn remove_membership(&self, user_id: i64, group_id: i64) -> Result<bool>;

    /// All members of a group with their junction-record fields
    async fn members(&self, group_id: i64) -> Result<Vec<Member>>;
}

/// SQLx-based group repository implementation
pub struct SqlxGroupRepository {
    pool: DbPool,
}

impl SqlxGroupRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use behind the trait
    pub fn boxed(pool: DbPool) -> Arc<dyn GroupRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl GroupRepository for SqlxGroupRepository {
    async fn create(&self, name: &str) -> Result<Group> {
        let result = sqlx::query("INSERT INTO groups (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .context("Failed to insert group")?;

        Ok(Group {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Group>> {
        let row = sqlx::query("SELECT * FROM groups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch group")?;

        Ok(row.map(|r| Group {
            id: r.get("id"),
            name: r.get("name"),
        }))
    }

    async fn list(&self) -> Result<Vec<Group>> {
        let rows = sqlx::query("SELECT * FROM groups ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list groups")?;

        Ok(rows
            .iter()
            .map(|r| Group {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete group")?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_membership(
        &self,
        user_id: i64,
        group_id: i64,
        date_joined: NaiveDate,
        invite_reason: &str,
    ) -> Result<Membership> {
        let result = sqlx::query(
            r#"INSERT INTO memberships (user_id, group_id, date_joined, invite_reason)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(user_id)
        .bind(group_id)
        .bind(date_joined)
        .bind(invite_reason)
        .execute(&self.pool)
        .await
        .context("Failed to insert membership")?;

        Ok(Membership {
            id: result.last_insert_rowid(),
            user_id,
            group_id,
            date_joined,
            invite_reason: invite_reason.to_string(),
        })
    }

    async fn remove_membership(&self, user_id: i64, group_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = ? AND group_id = ?")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete membership")?;
        Ok(result.rows_affected() > 0)
    }

    async fn members(&self, group_id: i64) -> Result<Vec<Member>> {
        let rows = sqlx::query(
            r#"SELECT m.user_id, m.date_joined, m.invite_reason, u.username
               FROM memberships m
               JOIN users u ON m.user_id = u.id
               WHERE m.group_id = ?
               ORDER BY m.date_joined ASC, u.username ASC"#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch group members")?;

        Ok(rows
            .iter()
            .map(|r| Member {
                user_id: r.get("user_id"),
                username: r.get("username"),
                date_joined: r.get("date_joined"),
                invite_reason: r.get("invite_reason"),
            })
            .collect())
    }
}
