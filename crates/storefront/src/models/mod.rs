//! Session-held visitor state and form models.

pub mod custom_order;
pub mod favorites;
pub mod session;

pub use custom_order::{CustomOrderErrors, CustomOrderForm, CustomOrderRequest, ReferenceImage};
pub use favorites::FavoriteSet;
pub use session::keys as session_keys;
