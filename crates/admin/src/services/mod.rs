//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Email and password login for admin accounts
//! - `panel` - Product CRUD and listings behind the panel pages

pub mod auth;
pub mod panel;

pub use auth::{AdminAuthError, AdminAuthService};
pub use panel::{
    CatalogStore, DeleteOutcome, ListingCache, PanelListing, PanelService, SaveTarget,
};
