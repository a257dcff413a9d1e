//! Integration tests for tudobacana.
//!
//! # Running Tests
//!
//! ```bash
//! # Start both servers against a migrated database
//! cargo run -p tudobacana-storefront &
//! cargo run -p tudobacana-admin &
//!
//! # Run the ignored tests
//! cargo test -p tudobacana-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront` - Public catalog, favorites and custom-order form
//! - `admin` - Login, session guard and product CRUD

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin panel (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Admin credentials for the login tests, created with `tb-cli admin create`.
///
/// Returns `None` when `TB_TEST_ADMIN_EMAIL` or `TB_TEST_ADMIN_PASSWORD` is
/// unset.
#[must_use]
pub fn admin_credentials() -> Option<(String, String)> {
    let email = std::env::var("TB_TEST_ADMIN_EMAIL").ok()?;
    let password = std::env::var("TB_TEST_ADMIN_PASSWORD").ok()?;
    Some((email, password))
}

/// HTTP client that keeps cookies and does not follow redirects.
///
/// # Errors
///
/// Returns `reqwest::Error` if the client cannot be built.
pub fn client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
