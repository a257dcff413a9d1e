//! Read-only product queries for the public catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use tudobacana_core::{Category, Price, Product, ProductId};

use super::RepositoryError;
use crate::catalog::ActiveProductSource;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    category: String,
    image_url: Option<String>,
    description: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;
        let category = Category::new(&row.category).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            price,
            category,
            image_url: row.image_url,
            description: row.description,
            active: row.active,
            created_at: row.created_at,
        })
    }
}

/// Repository for the storefront's product reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, category, image_url, description, active, created_at
            FROM products
            WHERE active = true
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

impl ActiveProductSource for ProductRepository<'_> {
    async fn active_products(&self) -> Result<Vec<Product>, RepositoryError> {
        self.list_active().await
    }
}
