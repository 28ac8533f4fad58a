//! Database connection pool
//!
//! SQLite pool creation for both file-backed and in-memory databases.
//! Foreign keys are enabled on the pool so cascade deletes work.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Connection pool type used throughout the application
pub type DbPool = SqlitePool;

/// Create a SQLite connection pool from configuration.
///
/// For file-backed databases the parent directory is created if missing and
/// the connection URL is given `mode=rwc` so the database file is created on
/// first run.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let url = config.url.as_str();
    let in_memory = url == ":memory:" || url.starts_with("sqlite::memory:");

    if !in_memory {
        let path = url.trim_start_matches("sqlite:");
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {:?}", parent)
                })?;
            }
        }
    }

    let connection_url = if in_memory {
        "sqlite::memory:".to_string()
    } else if url.starts_with("sqlite:") {
        if url.contains('?') {
            url.to_string()
        } else {
            format!("{}?mode=rwc", url)
        }
    } else {
        format!("sqlite:{}?mode=rwc", url)
    };

    // An in-memory SQLite database is private to its connection, so the
    // pool must not open a second one.
    let max_connections = if in_memory { 1 } else { 20 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&connection_url)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .context("Failed to enable foreign keys")?;

    Ok(pool)
}

/// Create an in-memory pool for tests
pub async fn create_test_pool() -> Result<DbPool> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
    };
    create_pool(&config).await
}
