//! Seed the catalog with the four sample products.
//!
//! Does nothing when the products table already has rows, so it is safe to
//! run on every deploy.

use tudobacana_admin::db::{ProductRepository, RepositoryError};
use tudobacana_core::{ProductDraft, SAMPLE_PRODUCTS, SampleError};

use super::{CommandError, connect};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid sample product: {0}")]
    InvalidSample(#[from] SampleError),
}

fn sample_drafts() -> Result<Vec<ProductDraft>, SeedError> {
    SAMPLE_PRODUCTS
        .iter()
        .map(|sample| sample.draft().map_err(SeedError::from))
        .collect()
}

/// Insert the sample products into an empty catalog.
///
/// # Errors
///
/// Returns `SeedError` if the connection or an insert fails.
pub async fn sample_products() -> Result<(), SeedError> {
    let drafts = sample_drafts()?;
    let pool = connect().await?;
    let products = ProductRepository::new(&pool);

    let existing = products.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Catalog already has products, skipping seed");
        return Ok(());
    }

    for draft in &drafts {
        let product = products.insert(draft).await?;
        tracing::info!(id = %product.id, name = %product.name, "Inserted sample product");
    }

    tracing::info!("Seeded {} sample products", drafts.len());
    Ok(())
}
