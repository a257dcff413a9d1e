//! Session check polled by panel pages.

use axum::http::StatusCode;

use crate::middleware::RequireAdminAuth;

/// Confirm the session is still alive.
///
/// GET /api/session
///
/// The guard answers for missing sessions (401 with `HX-Redirect: /auth`),
/// so reaching the body means the admin is still logged in.
pub async fn check(RequireAdminAuth(_admin): RequireAdminAuth) -> StatusCode {
    StatusCode::NO_CONTENT
}
