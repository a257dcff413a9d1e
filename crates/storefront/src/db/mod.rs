//! Database access for the storefront.
//!
//! The storefront only reads the shared `products` table. Products are
//! written by the admin panel and migrations live in
//! `crates/admin/migrations/`:
//! ```bash
//! cargo run -p tudobacana-cli -- migrate
//! ```

pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row could not be turned into a domain value.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a lazily connecting `PostgreSQL` connection pool.
///
/// Connections are opened on first use, so the storefront boots and serves
/// the sample catalog even while the database is unreachable.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())
}
