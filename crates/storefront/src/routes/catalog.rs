//! Catalog grid and favorite toggling (HTMX fragments).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use tudobacana_core::{Product, ProductId};

use crate::catalog::{CatalogLoader, CatalogOrigin};
use crate::db::ProductRepository;
use crate::error::{Result, add_breadcrumb};
use crate::models::FavoriteSet;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub favorite: bool,
}

impl ProductCard {
    fn new(product: Product, favorites: &FavoriteSet) -> Self {
        Self {
            id: product.id.to_string(),
            favorite: favorites.contains(product.id),
            price: product.price.to_string(),
            category: product.category.to_string(),
            image_url: product.image_url.filter(|url| !url.is_empty()),
            name: product.name,
            description: product.description,
        }
    }
}

/// Heart button state.
#[derive(Debug, Clone)]
pub struct FavoriteButton {
    pub id: String,
    pub favorite: bool,
}

/// Catalog grid fragment, swapped over the home page skeletons.
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog_grid.html")]
pub struct CatalogGridTemplate {
    pub cards: Vec<ProductCard>,
    pub showing_samples: bool,
}

/// Heart button fragment returned after a toggle.
#[derive(Template, WebTemplate)]
#[template(path = "partials/favorite_button.html")]
pub struct FavoriteButtonTemplate {
    pub card: FavoriteButton,
}

/// Render the product grid.
///
/// GET /catalogo
#[instrument(skip(state, session))]
pub async fn grid(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let repository = ProductRepository::new(state.pool());
    let catalog = CatalogLoader::new(&repository).load().await;
    let favorites = FavoriteSet::load(&session).await;

    tracing::debug!(
        count = catalog.products.len(),
        origin = ?catalog.origin,
        "Rendering catalog grid"
    );

    CatalogGridTemplate {
        showing_samples: catalog.origin == CatalogOrigin::Fallback,
        cards: catalog
            .products
            .into_iter()
            .map(|product| ProductCard::new(product, &favorites))
            .collect(),
    }
}

/// Toggle a product in the visitor's favorites.
///
/// POST /favoritos/{id}
///
/// # Errors
///
/// Returns `AppError::Session` if the session store rejects the write.
#[instrument(skip(session))]
pub async fn toggle_favorite(
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let mut favorites = FavoriteSet::load(&session).await;
    let favorite = favorites.toggle(id);
    favorites.save(&session).await?;

    let id = id.to_string();
    add_breadcrumb(
        "favorites",
        if favorite { "Added favorite" } else { "Removed favorite" },
        Some(&[("product_id", id.as_str())]),
    );

    Ok(FavoriteButtonTemplate {
        card: FavoriteButton { id, favorite },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::routes::test_support::{app, body_text, session_cookie};

    const BOWL: &str = "00000000-0000-0000-0000-000000000001";

    fn toggle(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(format!("/favoritos/{BOWL}"));
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_toggle_favorite_twice_restores_state() {
        let app = app();

        let first = app.clone().oneshot(toggle(None)).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let cookie = session_cookie(&first);
        let html = body_text(first).await;
        assert!(html.contains(r#"aria-pressed="true""#));

        let second = app.oneshot(toggle(Some(&cookie))).await.unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        let html = body_text(second).await;
        assert!(html.contains(r#"aria-pressed="false""#));
    }

    fn grid(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get("/catalogo");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_grid_shows_samples_when_database_is_down() {
        let response = app().oneshot(grid(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"data-origin="amostra""#));
        assert_eq!(html.matches(r#"<article class="product-card">"#).count(), 4);
        assert!(html.contains("Bowl Artesanal Terra"));
        assert!(html.contains("Caneca Cozy Morning"));
        assert!(html.contains("R$ 125,50"));
        assert!(html.contains("produto-2.svg"));
        assert!(!html.contains(r#"aria-pressed="true""#));
    }

    #[tokio::test]
    async fn test_grid_marks_toggled_favorite() {
        let app = app();
        let toggled = app.clone().oneshot(toggle(None)).await.unwrap();
        let cookie = session_cookie(&toggled);

        let response = app.oneshot(grid(Some(&cookie))).await.unwrap();
        let html = body_text(response).await;

        assert_eq!(html.matches(r#"aria-pressed="true""#).count(), 1);
        assert!(html.contains(&format!(r#"hx-post="/favoritos/{BOWL}""#)));
    }

    #[tokio::test]
    async fn test_toggle_favorite_rejects_bad_id() {
        let response = app()
            .oneshot(
                Request::post("/favoritos/nao-e-um-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
