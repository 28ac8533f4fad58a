//! Band service
//!
//! Group membership logic: adding a user to a group goes through the
//! explicit junction record, with `date_joined` defaulting to today when
//! the caller does not supply one.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::db::repositories::GroupRepository;
use crate::models::{Group, Member, Membership};
use crate::services::is_unique_violation;

/// Error types for band service operations
#[derive(Debug, thiserror::Error)]
pub enum BandServiceError {
    /// Group not found
    #[error("Group not found: {0}")]
    NotFound(i64),

    /// The user is already a member of the group
    #[error("User {user_id} is already a member of group {group_id}")]
    AlreadyMember { user_id: i64, group_id: i64 },

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Service for groups and their memberships
pub struct BandService {
    repo: Arc<dyn GroupRepository>,
}

impl BandService {
    pub fn new(repo: Arc<dyn GroupRepository>) -> Self {
        Self { repo }
    }

    /// Create a group
    pub async fn create_group(&self, name: &str) -> Result<Group, BandServiceError> {
        if name.trim().is_empty() {
            return Err(BandServiceError::ValidationError(
                "Group name must not be empty".into(),
            ));
        }
        Ok(self.repo.create(name.trim()).await?)
    }

    /// Get a group, erroring when missing
    pub async fn get_group(&self, id: i64) -> Result<Group, BandServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(BandServiceError::NotFound(id))
    }

    /// List all groups
    pub async fn list_groups(&self) -> Result<Vec<Group>, BandServiceError> {
        Ok(self.repo.list().await?)
    }

    /// Delete a group; its memberships cascade away with it
    pub async fn delete_group(&self, id: i64) -> Result<(), BandServiceError> {
        if !self.repo.delete(id).await? {
            return Err(BandServiceError::NotFound(id));
        }
        Ok(())
    }

    /// Add a user to a group.
    ///
    /// `date_joined` defaults to today and `invite_reason` to the empty
    /// string when omitted (the junction record's through-defaults).
    pub async fn add_member(
        &self,
        group_id: i64,
        user_id: i64,
        date_joined: Option<NaiveDate>,
        invite_reason: Option<&str>,
    ) -> Result<Membership, BandServiceError> {
        // Surface a missing group as NotFound rather than a constraint error
        self.get_group(group_id).await?;

        let date_joined = date_joined.unwrap_or_else(|| Utc::now().date_naive());
        let invite_reason = invite_reason.unwrap_or("");

        // Fast path; a concurrent join can still slip past this read
        if self
            .repo
            .members(group_id)
            .await?
            .iter()
            .any(|m| m.user_id == user_id)
        {
            return Err(BandServiceError::AlreadyMember { user_id, group_id });
        }

        match self
            .repo
            .add_membership(user_id, group_id, date_joined, invite_reason)
            .await
        {
            Ok(membership) => Ok(membership),
            // The UNIQUE(user_id, group_id) constraint settles the race
            Err(e) if is_unique_violation(&e) => {
                Err(BandServiceError::AlreadyMember { user_id, group_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a user from a group
    pub async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<(), BandServiceError> {
        self.get_group(group_id).await?;
        self.repo.remove_membership(user_id, group_id).await?;
        Ok(())
    }

    /// All members of a group with their junction-record fields
    pub async fn members(&self, group_id: i64) -> Result<Vec<Member>, BandServiceError> {
        self.get_group(group_id).await?;
        Ok(self.repo.members(group_id).await?)
    }
}
