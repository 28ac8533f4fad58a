//! Group and membership models
//!
//! Groups hold a many-to-many relationship with users, carried by an
//! explicit `Membership` junction record with `date_joined` and
//! `invite_reason` fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Group entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// Junction record linking a user to a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    pub user_id: i64,
    pub group_id: i64,
    pub date_joined: NaiveDate,
    pub invite_reason: String,
}

/// A group member: the user joined with their junction-record fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub user_id: i64,
    pub username: String,
    pub date_joined: NaiveDate,
    pub invite_reason: String,
}
