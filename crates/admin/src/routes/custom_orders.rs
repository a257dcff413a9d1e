//! Custom orders tab (read-only).

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use tudobacana_core::CustomOrder;

use super::PanelChrome;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::services::PanelService;
use crate::state::AppState;

pub const INDEX_PATH: &str = "/pedidos";

/// Custom order row for the table.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub name: String,
    pub email: String,
    pub whatsapp: Option<String>,
    /// `https://wa.me/...` link when the number has digits.
    pub whatsapp_url: Option<String>,
    pub description: String,
    pub status: String,
    pub created_on: String,
}

impl From<CustomOrder> for OrderView {
    fn from(order: CustomOrder) -> Self {
        let whatsapp_url = order
            .whatsapp_digits()
            .map(|digits| format!("https://wa.me/{digits}"));
        let created_on = order.created_on();

        Self {
            name: order.name,
            email: order.email,
            whatsapp: order.whatsapp,
            whatsapp_url,
            description: order.description,
            status: order.status,
            created_on,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "custom_orders/index.html")]
pub struct CustomOrdersIndexTemplate {
    pub chrome: PanelChrome,
    pub orders: Vec<OrderView>,
}

/// Custom orders tab.
///
/// GET /pedidos
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let store = state.catalog_store();
    let listing = PanelService::new(&store, state.listings()).load().await;
    let chrome = PanelChrome::new(&state, &session, &admin, INDEX_PATH, listing.notices).await;

    CustomOrdersIndexTemplate {
        chrome,
        orders: listing
            .custom_orders
            .into_iter()
            .map(OrderView::from)
            .collect(),
    }
}
