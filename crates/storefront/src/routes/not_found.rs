//! Fallback for unknown paths.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use super::PageChrome;
use crate::filters;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: PageChrome,
}

/// Render the 404 page and log the path that was requested.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    tracing::warn!(path = %uri.path(), "Visitor requested a page that does not exist");
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            chrome: PageChrome::from_config(state.config()),
        },
    )
}
