//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /produtos
//!
//! # Auth
//! GET  /auth                   - Login page
//! POST /auth                   - Email and password login
//! POST /auth/sair              - Logout
//!
//! # Session check (polled by every panel page)
//! GET  /api/session            - 204 while logged in, 401 + HX-Redirect otherwise
//!
//! # Products
//! GET  /produtos               - Products tab
//! GET  /produtos/novo          - New product form
//! POST /produtos               - Insert
//! GET  /produtos/{id}/editar   - Edit form
//! POST /produtos/{id}          - Update
//! POST /produtos/{id}/excluir  - Delete (HTMX, requires confirmar=sim)
//!
//! # Custom orders (read-only)
//! GET  /pedidos                - Custom orders tab
//! ```

pub mod auth;
pub mod custom_orders;
pub mod products;
pub mod session;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, Notice, take_flashes};
use crate::services::ListingCache;
use crate::state::AppState;

/// Header, tabs and toasts shared by every panel page.
#[derive(Debug, Clone)]
pub struct PanelChrome {
    pub admin_name: String,
    pub storefront_url: String,
    pub current_path: &'static str,
    pub product_count: usize,
    pub order_count: usize,
    pub notices: Vec<Notice>,
}

impl PanelChrome {
    /// Build the chrome, consuming pending flash messages and appending
    /// `notices` after them.
    pub async fn new(
        state: &AppState,
        session: &Session,
        admin: &CurrentAdmin,
        current_path: &'static str,
        notices: Vec<Notice>,
    ) -> Self {
        let mut all_notices = take_flashes(session).await;
        all_notices.extend(notices);
        let (product_count, order_count) = tab_counts(state.listings()).await;

        Self {
            admin_name: admin.name.clone(),
            storefront_url: state.config().storefront_url.clone(),
            current_path,
            product_count,
            order_count,
            notices: all_notices,
        }
    }

    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}

async fn tab_counts(listings: &ListingCache) -> (usize, usize) {
    (
        listings.products().await.len(),
        listings.custom_orders().await.len(),
    )
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(products::INDEX_PATH) }))
        .route("/auth", get(auth::login_page).post(auth::login))
        .route("/auth/sair", post(auth::logout))
        .route("/api/session", get(session::check))
        .route(products::INDEX_PATH, get(products::index).post(products::create))
        .route("/produtos/novo", get(products::new_form))
        .route("/produtos/{id}", post(products::update))
        .route("/produtos/{id}/editar", get(products::edit_form))
        .route("/produtos/{id}/excluir", post(products::delete))
        .route(custom_orders::INDEX_PATH, get(custom_orders::index))
}
