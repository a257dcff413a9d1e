//! Session middleware configuration.
//!
//! Visitor sessions only carry favorites, so they are kept in a bounded
//! in-memory store and dropped on restart.

use tower_sessions::{Expiry, SessionManagerLayer};

use super::session_store::BoundedMemoryStore;
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tb_session";

/// Session expiry time in seconds (1 day of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Most sessions held at once. Older, rarely used ones are evicted first.
pub const SESSION_STORE_CAPACITY: u64 = 10_000;

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<BoundedMemoryStore> {
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(BoundedMemoryStore::new(SESSION_STORE_CAPACITY))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
