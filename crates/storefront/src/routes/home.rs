//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use super::PageChrome;
use crate::catalog::SKELETON_CARD_COUNT;
use crate::filters;
use crate::models::FavoriteSet;
use crate::state::AppState;

/// Home page template.
///
/// The product grid is not rendered here. The page ships skeleton cards that
/// swap themselves for `/catalogo` once loaded.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub skeleton_count: usize,
}

/// Display the home page.
///
/// A full page load starts a fresh visit, so favorites are cleared.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    FavoriteSet::clear(&session).await;

    HomeTemplate {
        chrome: PageChrome::from_config(state.config()),
        skeleton_count: SKELETON_CARD_COUNT,
    }
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

    #[tokio::test]
    async fn test_home_renders_skeletons_that_load_catalog() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Nossa Coleção"));
        assert!(html.contains(r#"hx-get="/catalogo""#));
        assert_eq!(html.matches("product-card skeleton").count(), 4);
        assert!(html.contains("http://localhost:3001/auth"));
        assert!(html.contains("https://wa.me/SEUNUMERO?text="));
    }

    #[tokio::test]
    async fn test_reload_clears_favorites() {
        let app = app();

        let toggled = app
            .clone()
            .oneshot(
                Request::post("/favoritos/00000000-0000-0000-0000-000000000001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let cookie = session_cookie(&toggled);

        let reload = app
            .clone()
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(reload.status(), StatusCode::OK);

        let grid = app
            .oneshot(
                Request::get("/catalogo")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(grid).await;
        assert_eq!(html.matches("product-card").count(), 4);
        assert!(!html.contains(r#"aria-pressed="true""#));
    }

    #[tokio::test]
    async fn test_home_without_favorites_sets_no_cookie() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
