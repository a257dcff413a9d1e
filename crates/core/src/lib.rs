//! tudobacana Core - Shared types library.
//!
//! This crate provides common types used across all tudobacana components:
//! - `storefront` - Public ceramics catalog and custom-order form
//! - `admin` - Product and custom-order administration panel
//! - `cli` - Command-line tools for migrations, admin users and sample data
//!
//! # Architecture
//!
//! The core crate contains only types and validation. No I/O, no database
//! access, no HTTP. Database encoding lives behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for IDs, BRL prices, emails and category labels
//! - [`models`] - Product and custom-order records, product form validation,
//!   the built-in sample catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
