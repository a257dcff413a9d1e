//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                      - Home page (hero, catalog skeletons, contact, footer)
//! GET  /catalogo              - Catalog grid fragment (HTMX, loaded by the home page)
//! POST /favoritos/{id}        - Toggle a favorite, returns the heart button fragment
//! GET  /personalizados        - Custom-order request form
//! POST /personalizados        - Validate and log a custom-order request
//! *                           - 404 page
//! ```

pub mod catalog;
pub mod custom_order;
pub mod home;
pub mod not_found;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::config::StorefrontConfig;
use crate::state::AppState;

/// Upper bound for custom-order uploads, reference image included.
const CUSTOM_ORDER_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Links and contact details shared by every full page.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub admin_login_url: String,
    pub whatsapp_url: String,
    pub contact_email: String,
    pub instagram_url: String,
    pub instagram_handle: String,
}

impl PageChrome {
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            admin_login_url: config.admin_login_url(),
            whatsapp_url: config.contact.whatsapp_url(),
            contact_email: config.contact.email.clone(),
            instagram_url: config.contact.instagram_url.clone(),
            instagram_handle: config.contact.instagram_handle(),
        }
    }
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/catalogo", get(catalog::grid))
        .route("/favoritos/{id}", post(catalog::toggle_favorite))
        .route(
            "/personalizados",
            get(custom_order::show)
                .post(custom_order::submit)
                .layer(DefaultBodyLimit::max(CUSTOM_ORDER_BODY_LIMIT)),
        )
        .fallback(not_found::not_found)
}
