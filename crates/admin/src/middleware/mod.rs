//! HTTP middleware for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authentication is not a layer: each protected handler takes the
//! [`RequireAdminAuth`] extractor.

pub mod auth;
pub mod session;

pub use auth::{
    AdminAuthRejection, LOGIN_PATH, OptionalAdminAuth, RequireAdminAuth, clear_current_admin,
    set_current_admin,
};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, create_session_store};
