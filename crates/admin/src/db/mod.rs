//! Database operations for the admin panel.
//!
//! The panel shares one `PostgreSQL` database with the storefront.
//!
//! ## Tables
//!
//! - `products` - Catalog, read by the storefront and edited here
//! - `custom_orders` - Custom-order requests (read-only in the panel)
//! - `admin.admin_user` - Admin accounts with Argon2 password hashes
//! - `admin.session` - Admin session storage (tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p tudobacana-cli -- migrate
//! ```

pub mod admin_users;
pub mod custom_orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use tudobacana_core::{CustomOrder, Product, ProductDraft, ProductId};

pub use admin_users::AdminUserRepository;
pub use custom_orders::CustomOrderRepository;
pub use products::ProductRepository;

use crate::services::panel::CatalogStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// [`CatalogStore`] backed by the shared `PostgreSQL` tables.
#[derive(Clone, Copy)]
pub struct PgCatalogStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCatalogStore<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore<'_> {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(self.pool).list_all().await
    }

    async fn list_custom_orders(&self) -> Result<Vec<CustomOrder>, RepositoryError> {
        CustomOrderRepository::new(self.pool).list_all().await
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(self.pool).get_by_id(id).await
    }

    async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        ProductRepository::new(self.pool).insert(draft).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        ProductRepository::new(self.pool).update(id, draft).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        ProductRepository::new(self.pool).delete(id).await
    }
}
