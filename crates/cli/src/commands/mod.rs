//! Subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Errors shared by every command that touches the database.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Neither database URL variable is set.
    #[error("Missing environment variable: ADMIN_DATABASE_URL (or DATABASE_URL)")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Database URL from `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// # Errors
///
/// Returns `CommandError::MissingDatabaseUrl` if neither is set.
pub fn database_url() -> Result<SecretString, CommandError> {
    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingDatabaseUrl)
}

/// Connect to the database named by [`database_url`].
///
/// # Errors
///
/// Returns `CommandError` if the URL is missing or the connection fails.
pub async fn connect() -> Result<PgPool, CommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to database...");
    Ok(tudobacana_admin::db::create_pool(&url).await?)
}
