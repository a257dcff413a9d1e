//! Public catalog loading with a built-in sample fallback.
//!
//! The storefront never shows an error state for the product grid. When the
//! database returns nothing, or fails, visitors see the four sample pieces
//! below instead.

use std::future::Future;

use tudobacana_core::{Product, SAMPLE_PRODUCTS};

use crate::db::RepositoryError;

/// Number of placeholder cards rendered while the grid loads.
pub const SKELETON_CARD_COUNT: usize = 4;

/// Anything that can list active products, newest first.
pub trait ActiveProductSource {
    fn active_products(
        &self,
    ) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;
}

/// Where the displayed products came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Database,
    Fallback,
}

/// The product list chosen for display.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub origin: CatalogOrigin,
}

/// Loads the public catalog from an [`ActiveProductSource`].
pub struct CatalogLoader<'a, S> {
    source: &'a S,
}

impl<'a, S: ActiveProductSource + Sync> CatalogLoader<'a, S> {
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// A non-empty result is shown as-is. An empty result or an error gives
    /// the sample list.
    pub async fn load(&self) -> Catalog {
        match self.source.active_products().await {
            Ok(products) if !products.is_empty() => Catalog {
                products,
                origin: CatalogOrigin::Database,
            },
            Ok(_) => {
                tracing::info!("No active products, showing sample catalog");
                Catalog {
                    products: fallback_products(),
                    origin: CatalogOrigin::Fallback,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load products, showing sample catalog");
                Catalog {
                    products: fallback_products(),
                    origin: CatalogOrigin::Fallback,
                }
            }
        }
    }
}

/// The fixed sample catalog, in display order.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    SAMPLE_PRODUCTS
        .iter()
        .filter_map(|sample| match sample.product() {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::error!(error = %e, "Invalid sample product");
                None
            }
        })
        .collect()
}
