//! Database layer
//!
//! SQLite access for Gazette: connection pool creation, embedded code-based
//! migrations, and repository implementations per entity.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, DbPool};
