//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! TB_ADMIN_PASSWORD='...' tb-cli admin create -e ana@tudobacana.com -n "Ana"
//! ```

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use tudobacana_admin::services::{AdminAuthError, AdminAuthService};
use tudobacana_core::AdminUserId;

use super::{CommandError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Command(#[from] CommandError),

    /// User already exists.
    #[error("Admin user already exists with email: {0}")]
    UserExists(String),

    #[error(transparent)]
    Auth(AdminAuthError),
}

/// Create a new admin user with an Argon2id-hashed password.
///
/// # Errors
///
/// Returns `AdminError::UserExists` for a duplicate email and
/// `AdminError::Auth` for invalid input or database failures.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &SecretString,
) -> Result<AdminUserId, AdminError> {
    let pool = connect().await?;

    tracing::info!("Creating admin user: {}", email);

    let user = AdminAuthService::new(&pool)
        .create_admin(email, name, password.expose_secret())
        .await
        .map_err(|e| match e {
            AdminAuthError::UserAlreadyExists => AdminError::UserExists(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(user.id)
}
