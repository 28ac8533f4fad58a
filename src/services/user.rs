//! User service
//!
//! Business logic for accounts and authentication: registration, login,
//! logout, and session validation.

use anyhow::Result;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{RegisterInput, Session, User};
use crate::services::is_unique_violation;
use crate::services::password::{hash_password, verify_password};

/// Default session expiration time in days
const DEFAULT_SESSION_EXPIRATION_DAYS: i64 = 7;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Session expired
    #[error("Session expired")]
    SessionExpired,

    /// Session not found
    #[error("Session not found")]
    SessionNotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Input for logging in
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// User service for managing accounts and authentication
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_expiration_days: i64,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, session_repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiration_days: DEFAULT_SESSION_EXPIRATION_DAYS,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username, email, or password is empty, the
    ///   email has no `@`, or age is negative
    /// - `UserExists` if username or email is already taken
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserServiceError> {
        let username = input.username.trim();
        let email = input.email.trim();

        if username.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username must not be empty".into(),
            ));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(UserServiceError::ValidationError(
                "A valid email address is required".into(),
            ));
        }
        if input.password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Password must not be empty".into(),
            ));
        }
        if matches!(input.age, Some(age) if age < 0) {
            return Err(UserServiceError::ValidationError(
                "Age must not be negative".into(),
            ));
        }

        // Fast path; a concurrent signup can still slip past these reads
        if self.user_repo.get_by_username(username).await?.is_some() {
            return Err(UserServiceError::UserExists(username.to_string()));
        }
        if self.user_repo.get_by_email(email).await?.is_some() {
            return Err(UserServiceError::UserExists(email.to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            username.to_string(),
            email.to_string(),
            password_hash,
            input.age,
        );

        let created = match self.user_repo.create(&user).await {
            Ok(created) => created,
            // The unique indexes on username and email settle the race
            Err(e) if is_unique_violation(&e) => {
                return Err(UserServiceError::UserExists(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(user_id = created.id, username = %created.username, "User registered");
        Ok(created)
    }

    /// Log a user in, creating a session.
    ///
    /// # Errors
    ///
    /// `AuthenticationError` when the username is unknown or the password
    /// does not match.
    pub async fn login(&self, input: LoginInput) -> Result<Session, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(input.username.trim())
            .await?
            .ok_or_else(|| {
                UserServiceError::AuthenticationError("Invalid username or password".into())
            })?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserServiceError::AuthenticationError(
                "Invalid username or password".into(),
            ));
        }

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user.id,
            expires_at: now + Duration::days(self.session_expiration_days),
            created_at: now,
        };
        self.session_repo.create(&session).await?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(session)
    }

    /// Destroy a session
    pub async fn logout(&self, session_id: &str) -> Result<(), UserServiceError> {
        self.session_repo.delete(session_id).await?;
        Ok(())
    }

    /// Validate a session token, returning the associated user.
    ///
    /// Expired sessions are removed as a side effect.
    pub async fn validate_session(&self, session_id: &str) -> Result<User, UserServiceError> {
        let session = self
            .session_repo
            .get_by_id(session_id)
            .await?
            .ok_or(UserServiceError::SessionNotFound)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(UserServiceError::SessionExpired);
        }

        self.user_repo
            .get_by_id(session.user_id)
            .await?
            .ok_or(UserServiceError::SessionNotFound)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, UserServiceError> {
        Ok(self.user_repo.get_by_id(id).await?)
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.user_repo.list().await?)
    }
}
