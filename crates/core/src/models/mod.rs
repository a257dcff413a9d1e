//! Catalog records and admin form input.

pub mod custom_order;
pub mod product;
pub mod sample;

pub use custom_order::CustomOrder;
pub use product::{Product, ProductDraft, ProductDraftError, ProductInput};
pub use sample::{SAMPLE_PRODUCTS, SampleError, SampleProduct};
