//! The four sample pieces.
//!
//! The storefront shows them when the catalog is empty or unreachable. The
//! CLI seeds them into an empty database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{Product, ProductDraft};
use crate::types::{Category, CategoryError, Price, PriceError, ProductId};

/// A built-in catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleProduct {
    /// 1-based position, also used for the product id and image name.
    pub slot: u8,
    pub name: &'static str,
    pub cents: i64,
    pub category: &'static str,
    pub description: &'static str,
}

/// Sample catalog in display order.
pub const SAMPLE_PRODUCTS: [SampleProduct; 4] = [
    SampleProduct {
        slot: 1,
        name: "Bowl Artesanal Terra",
        cents: 8990,
        category: "Bowls",
        description: "Bowl em cerâmica com esmalte terroso, ideal para saladas e frutas.",
    },
    SampleProduct {
        slot: 2,
        name: "Vaso Curves Naturais",
        cents: 12550,
        category: "Vasos",
        description: "Vaso de linhas orgânicas, modelado à mão.",
    },
    SampleProduct {
        slot: 3,
        name: "Conjunto Pratos Rústicos",
        cents: 14500,
        category: "Conjuntos",
        description: "Conjunto com quatro pratos de acabamento rústico.",
    },
    SampleProduct {
        slot: 4,
        name: "Caneca Cozy Morning",
        cents: 6500,
        category: "Canecas",
        description: "Caneca de 300 ml para o café da manhã.",
    },
];

/// Errors building a sample entry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("{name}: {source}")]
    Price {
        name: &'static str,
        source: PriceError,
    },
    #[error("{name}: {source}")]
    Category {
        name: &'static str,
        source: CategoryError,
    },
}

impl SampleProduct {
    /// Image path served by the storefront under `/static`.
    #[must_use]
    pub fn image_url(&self) -> String {
        format!("/static/images/produto-{}.svg", self.slot)
    }

    /// Unsaved product for the seed command.
    ///
    /// # Errors
    ///
    /// Returns `SampleError` if the price or category is rejected.
    pub fn draft(&self) -> Result<ProductDraft, SampleError> {
        let name = self.name;
        Ok(ProductDraft {
            name: name.to_owned(),
            price: Price::new(Decimal::new(self.cents, 2))
                .map_err(|source| SampleError::Price { name, source })?,
            category: Category::new(self.category)
                .map_err(|source| SampleError::Category { name, source })?,
            image_url: Some(self.image_url()),
            description: Some(self.description.to_owned()),
            active: true,
        })
    }

    /// Display product with a fixed id derived from the slot.
    ///
    /// # Errors
    ///
    /// Returns `SampleError` if the price or category is rejected.
    pub fn product(&self) -> Result<Product, SampleError> {
        let draft = self.draft()?;
        Ok(Product {
            id: ProductId::from_u128(u128::from(self.slot)),
            name: draft.name,
            price: draft.price,
            category: draft.category,
            image_url: draft.image_url,
            description: draft.description,
            active: draft.active,
            created_at: DateTime::<Utc>::default(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_build_in_slot_order() {
        let products: Vec<Product> = SAMPLE_PRODUCTS
            .iter()
            .map(|sample| sample.product().unwrap())
            .collect();

        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=4).map(ProductId::from_u128).collect::<Vec<_>>());
        assert_eq!(products[1].price.to_string(), "R$ 125,50");
        assert_eq!(
            products[3].image_url.as_deref(),
            Some("/static/images/produto-4.svg")
        );
    }

    #[test]
    fn test_draft_and_product_agree() {
        for sample in &SAMPLE_PRODUCTS {
            let draft = sample.draft().unwrap();
            let product = sample.product().unwrap();
            assert_eq!(draft.name, product.name);
            assert_eq!(draft.price, product.price);
            assert_eq!(draft.category, product.category);
            assert_eq!(draft.image_url, product.image_url);
            assert!(draft.category.is_suggestion());
        }
    }
}
