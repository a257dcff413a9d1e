//! Admin authentication service.
//!
//! Email and password login against `admin.admin_user`, with Argon2id
//! password hashes. Accounts are created from the CLI only.

mod error;

pub use error::AdminAuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use tudobacana_core::Email;

use crate::db::RepositoryError;
use crate::db::admin_users::AdminUserRepository;
use crate::models::admin_user::AdminUser;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    users: AdminUserRepository<'a>,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: AdminUserRepository::new(pool),
        }
    }

    /// Check an email and password pair.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidEmail` if the email is malformed.
    /// Returns `AdminAuthError::InvalidCredentials` if the user does not
    /// exist or the password does not match.
    /// Returns `AdminAuthError::Repository` if the lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, AdminAuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AdminAuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidEmail`, `AdminAuthError::EmptyName` or
    /// `AdminAuthError::PasswordTooShort` for bad input.
    /// Returns `AdminAuthError::UserAlreadyExists` if the email is taken.
    /// Returns `AdminAuthError::Repository` for other database errors.
    pub async fn create_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AdminUser, AdminAuthError> {
        let email = Email::parse(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AdminAuthError::EmptyName);
        }
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        self.users
            .create(&email, name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AdminAuthError::UserAlreadyExists,
                other => AdminAuthError::Repository(other),
            })
    }
}

/// Reject passwords shorter than [`MIN_PASSWORD_LENGTH`] characters.
///
/// # Errors
///
/// Returns `AdminAuthError::PasswordTooShort` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AdminAuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AdminAuthError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AdminAuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminAuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash.
///
/// # Errors
///
/// Returns `AdminAuthError::InvalidCredentials` if the hash is unreadable or
/// the password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AdminAuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("barro-e-esmalte").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("barro-e-esmalte", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hash = hash_password("barro-e-esmalte").unwrap();
        assert!(matches!(
            verify_password("barro-e-vidrado", &hash),
            Err(AdminAuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unreadable_hash_is_rejected() {
        assert!(matches!(
            verify_password("qualquer", "not-a-phc-string"),
            Err(AdminAuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_salts_differ_per_hash() {
        let first = hash_password("mesma-senha").unwrap();
        let second = hash_password("mesma-senha").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(matches!(
            validate_password("1234567"),
            Err(AdminAuthError::PasswordTooShort { min: 8 })
        ));
        // Counted in characters, not bytes.
        assert!(validate_password("çççç").is_err());
    }
}
