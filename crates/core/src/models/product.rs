//! Catalog products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, CategoryError, Price, PriceError, ProductId};

/// A product row as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub image_url: Option<String>,
    pub description: Option<String>,
    /// Only active products are shown on the storefront.
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product has an image to render instead of a placeholder.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Problems found while validating product input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductDraftError {
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
    #[error("invalid category: {0}")]
    Category(#[from] CategoryError),
    #[error("image URL must be absolute http(s) or site-relative")]
    ImageUrl,
}

/// Raw product fields as typed into the admin form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductInput<'a> {
    pub name: &'a str,
    pub price: &'a str,
    pub category: &'a str,
    pub custom_category: &'a str,
    pub image_url: &'a str,
    pub description: &'a str,
    pub active: bool,
}

/// Validated fields for an insert or update. The database assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub active: bool,
}

impl ProductDraft {
    /// Validate form input. Blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProductDraftError`] found, checking fields in form
    /// order.
    pub fn parse(input: &ProductInput<'_>) -> Result<Self, ProductDraftError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ProductDraftError::EmptyName);
        }

        let price = Price::parse(input.price)?;
        let category = Category::from_choice(input.category, input.custom_category)?;

        let image_url = non_blank(input.image_url);
        if let Some(url) = &image_url {
            let acceptable =
                url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/');
            if !acceptable {
                return Err(ProductDraftError::ImageUrl);
            }
        }

        Ok(Self {
            name: name.to_owned(),
            price,
            category,
            image_url,
            description: non_blank(input.description),
            active: input.active,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> ProductInput<'static> {
        ProductInput {
            name: "Bowl Artesanal Terra",
            price: "89.90",
            category: "Bowls",
            custom_category: "",
            image_url: "",
            description: "",
            active: true,
        }
    }

    #[test]
    fn test_parse_minimal() {
        let draft = ProductDraft::parse(&input()).unwrap();
        assert_eq!(draft.name, "Bowl Artesanal Terra");
        assert_eq!(draft.price.to_string(), "R$ 89,90");
        assert_eq!(draft.category.as_str(), "Bowls");
        assert_eq!(draft.image_url, None);
        assert_eq!(draft.description, None);
        assert!(draft.active);
    }

    #[test]
    fn test_parse_custom_category() {
        let draft = ProductDraft::parse(&ProductInput {
            category: "Outros",
            custom_category: "Luminárias",
            ..input()
        })
        .unwrap();
        assert_eq!(draft.category.as_str(), "Luminárias");
    }

    #[test]
    fn test_parse_keeps_optional_fields() {
        let draft = ProductDraft::parse(&ProductInput {
            image_url: " https://cdn.tudobacana.com/bowl.jpg ",
            description: "Esmalte terracota",
            active: false,
            ..input()
        })
        .unwrap();
        assert_eq!(
            draft.image_url.as_deref(),
            Some("https://cdn.tudobacana.com/bowl.jpg")
        );
        assert_eq!(draft.description.as_deref(), Some("Esmalte terracota"));
        assert!(!draft.active);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ProductDraft::parse(&ProductInput { name: "  ", ..input() }),
            Err(ProductDraftError::EmptyName)
        );
        assert_eq!(
            ProductDraft::parse(&ProductInput { price: "-5", ..input() }),
            Err(ProductDraftError::Price(PriceError::Negative))
        );
        assert!(matches!(
            ProductDraft::parse(&ProductInput { price: "caro", ..input() }),
            Err(ProductDraftError::Price(PriceError::Invalid(_)))
        ));
        assert_eq!(
            ProductDraft::parse(&ProductInput { category: "Outros", ..input() }),
            Err(ProductDraftError::Category(CategoryError::MissingCustom))
        );
        assert_eq!(
            ProductDraft::parse(&ProductInput { image_url: "ftp://x/y.jpg", ..input() }),
            Err(ProductDraftError::ImageUrl)
        );
    }
}
