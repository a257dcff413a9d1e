//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] tudobacana_core::EmailError),

    /// Unknown email or wrong password. The two cases are not distinguished.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Admin user already exists.
    #[error("admin user already exists")]
    UserAlreadyExists,

    /// Empty display name.
    #[error("admin name cannot be empty")]
    EmptyName,

    /// Password shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Argon2 failed to produce a hash.
    #[error("failed to hash password")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
