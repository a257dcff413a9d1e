//! Session keys.
//!
//! Storefront sessions live in memory only. Nothing here survives a restart.

/// Session keys for visitor data.
pub mod keys {
    /// Key for the visitor's [`FavoriteSet`](crate::models::FavoriteSet).
    pub const FAVORITES: &str = "favorites";
}
