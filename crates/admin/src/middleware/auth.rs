//! Authentication extractors for admin.
//!
//! Every panel handler takes [`RequireAdminAuth`], so the session is checked
//! on each request rather than once at login.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Login page every rejection points to.
pub const LOGIN_PATH: &str = "/auth";

/// Header HTMX follows with a full page navigation.
const HX_REDIRECT: &str = "HX-Redirect";

/// Extractor that requires admin authentication.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Olá, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but the user is not logged in.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// 303 redirect to the login page (plain browser navigation).
    RedirectToLogin,
    /// 401 with `HX-Redirect` (HTMX and `/api/` requests).
    Unauthorized,
}

impl AdminAuthRejection {
    fn for_request(parts: &Parts) -> Self {
        let is_api = parts.uri.path().starts_with("/api/");
        let is_htmx = parts
            .headers
            .get("HX-Request")
            .is_some_and(|value| value == "true");

        if is_api || is_htmx {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => {
                (StatusCode::UNAUTHORIZED, [(HX_REDIRECT, LOGIN_PATH)]).into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let Some(session) = parts.extensions.get::<Session>() else {
            return Err(AdminAuthRejection::for_request(parts));
        };

        let admin: Option<CurrentAdmin> = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten();

        admin
            .map(Self)
            .ok_or_else(|| AdminAuthRejection::for_request(parts))
    }
}

/// Extractor that optionally gets the current admin.
///
/// Unlike `RequireAdminAuth`, this does not reject the request if the admin is not logged in.
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to end the admin session (logout).
///
/// # Errors
///
/// Returns an error if the session store cannot delete the record.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
