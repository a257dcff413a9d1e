//! Session middleware configuration for admin.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions with
//! stricter settings than the storefront (SameSite=Strict, 24hr expiry).

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "tb_admin_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Schema holding the session table.
pub const SESSION_SCHEMA: &str = "admin";

/// Session table name.
pub const SESSION_TABLE: &str = "session";

/// `PostgreSQL` session store on `admin.session`.
///
/// The table must be created via migration in the admin schema.
///
/// # Panics
///
/// Panics if the schema name or table name is invalid (should never happen
/// with the constant "admin" and "session" values).
#[must_use]
pub fn create_session_store(pool: &PgPool) -> PostgresStore {
    PostgresStore::new(pool.clone())
        .with_schema_name(SESSION_SCHEMA)
        .expect("valid schema name")
        .with_table_name(SESSION_TABLE)
        .expect("valid table name")
}

/// Wrap a session store with the admin cookie settings.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &AdminConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        // SameSite=Strict for admin (stricter than storefront's Lax)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
