//! Authentication route handlers for admin.
//!
//! Login page, email and password login, and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{LOGIN_PATH, OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::routes::products::INDEX_PATH;
use crate::services::{AdminAuthError, AdminAuthService};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "E-mail ou senha inválidos";
const LOGIN_FAILED: &str = "Não foi possível entrar agora. Tente novamente.";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub storefront_url: String,
    pub email: String,
    pub error: Option<&'static str>,
}

/// Submitted login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Render the login page. Logged-in admins go straight to the panel.
///
/// GET /auth
#[instrument(skip(state, admin))]
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAdminAuth(admin): OptionalAdminAuth,
) -> Response {
    if admin.is_some() {
        return Redirect::to(INDEX_PATH).into_response();
    }

    LoginTemplate {
        storefront_url: state.config().storefront_url.clone(),
        email: String::new(),
        error: None,
    }
    .into_response()
}

/// Check credentials and start the admin session.
///
/// POST /auth
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be written.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let service = AdminAuthService::new(state.pool());

    let rejected = |status: StatusCode, error: &'static str| {
        (
            status,
            LoginTemplate {
                storefront_url: state.config().storefront_url.clone(),
                email: form.email.trim().to_string(),
                error: Some(error),
            },
        )
            .into_response()
    };

    match service.login(&form.email, &form.password).await {
        Ok(user) => {
            let admin = CurrentAdmin::from(&user);
            set_current_admin(&session, &admin).await?;
            set_sentry_user(&admin);
            tracing::info!(admin_id = %admin.id, "Admin logged in");
            Ok(Redirect::to(INDEX_PATH).into_response())
        }
        Err(AdminAuthError::InvalidEmail(_) | AdminAuthError::InvalidCredentials) => {
            tracing::warn!("Admin login rejected");
            Ok(rejected(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS))
        }
        Err(e) => {
            tracing::error!(error = %e, "Admin login failed");
            Ok(rejected(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED))
        }
    }
}

/// End the session and return to the login page.
///
/// POST /auth/sair
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    clear_sentry_user();

    Redirect::to(LOGIN_PATH)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::routes::test_support::{app, body_text, login};

    #[tokio::test]
    async fn test_login_page_renders_form() {
        let response = app()
            .oneshot(Request::get("/auth").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"action="/auth""#));
        assert!(html.contains(r#"type="password""#));
        assert!(html.contains("http://localhost:3000"));
    }

    #[tokio::test]
    async fn test_login_page_skips_form_when_logged_in() {
        let app = app();
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::get("/auth")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/produtos");
    }

    #[tokio::test]
    async fn test_malformed_email_is_rejected_without_lookup() {
        let response = app()
            .oneshot(
                Request::post("/auth")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("email=nao-e-email&password=qualquer"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let html = body_text(response).await;
        assert!(html.contains("E-mail ou senha inválidos"));
        assert!(html.contains(r#"value="nao-e-email""#));
    }
}
