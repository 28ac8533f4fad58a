//! Business logic services
//!
//! Services sit between the HTTP handlers and the repositories. They own
//! input validation and the rules the views rely on (ownership checks,
//! through-defaults for memberships, credential verification).

pub mod article;
pub mod band;
pub mod password;
pub mod post;
pub mod user;

pub use article::{ArticleService, ArticleServiceError};
pub use band::{BandService, BandServiceError};
pub use post::{PostService, PostServiceError};
pub use user::{LoginInput, UserService, UserServiceError};

/// Whether an error bottoms out in a SQL unique-constraint violation.
///
/// Uniqueness pre-checks in the services are only a fast path; two
/// concurrent writes can both pass them, and the losing insert comes back
/// through here so callers can report the conflict instead of a 500.
pub(crate) fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map_or(false, |db| db.is_unique_violation())
}
