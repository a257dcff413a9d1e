//! Value types shared by the storefront, admin and CLI.

pub mod category;
pub mod email;
pub mod id;
pub mod price;

pub use category::{Category, CategoryChoice, CategoryError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
