//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `ADMIN_URL` - Where the header "Admin" link points (default: `http://localhost:3001`)
//! - `WHATSAPP_NUMBER` - Number used in `wa.me` links, digits only (default: `SEUNUMERO`)
//! - `CONTACT_EMAIL` - Address shown in the footer (default: `contato@tudobacana.com`)
//! - `INSTAGRAM_URL` - Profile linked from the footer (default: `https://instagram.com/tudobacanasp`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Greeting pre-filled in WhatsApp conversations opened from the site.
pub const WHATSAPP_GREETING: &str =
    "Olá! Vi suas cerâmicas no site e gostaria de saber mais 😊";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL, also decides whether the session cookie is `Secure`
    pub base_url: String,
    pub admin_url: String,
    pub contact: ContactConfig,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Brand contact channels rendered in the page chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub whatsapp_number: String,
    pub email: String,
    pub instagram_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "SEUNUMERO".to_string(),
            email: "contato@tudobacana.com".to_string(),
            instagram_url: "https://instagram.com/tudobacanasp".to_string(),
        }
    }
}

impl ContactConfig {
    /// `wa.me` link that opens a chat with the brand and the default greeting.
    #[must_use]
    pub fn whatsapp_url(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.whatsapp_number,
            urlencoding::encode(WHATSAPP_GREETING)
        )
    }

    /// Instagram handle derived from the profile URL, e.g. `@tudobacanasp`.
    #[must_use]
    pub fn instagram_handle(&self) -> String {
        let handle = self
            .instagram_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        format!("@{handle}")
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
        let host = parse_env("STOREFRONT_HOST", &get_env_or_default("STOREFRONT_HOST", "127.0.0.1"))?;
        let port = parse_env("STOREFRONT_PORT", &get_env_or_default("STOREFRONT_PORT", "3000"))?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let admin_url = get_env_or_default("ADMIN_URL", "http://localhost:3001");

        let defaults = ContactConfig::default();
        let contact = ContactConfig {
            whatsapp_number: get_optional_env("WHATSAPP_NUMBER")
                .unwrap_or(defaults.whatsapp_number),
            email: get_optional_env("CONTACT_EMAIL").unwrap_or(defaults.email),
            instagram_url: get_optional_env("INSTAGRAM_URL").unwrap_or(defaults.instagram_url),
        };

        let sentry_sample_rate =
            parse_sample_rate("SENTRY_SAMPLE_RATE", &get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"))?;
        let sentry_traces_sample_rate = parse_sample_rate(
            "SENTRY_TRACES_SAMPLE_RATE",
            &get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_url: admin_url.trim_end_matches('/').to_string(),
            contact,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Admin login page linked from the header.
    #[must_use]
    pub fn admin_login_url(&self) -> String {
        format!("{}/auth", self.admin_url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_sample_rate(key: &str, raw: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env(key, raw)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            admin_url: "http://localhost:3001".to_string(),
            contact: ContactConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_admin_login_url() {
        assert_eq!(config().admin_login_url(), "http://localhost:3001/auth");
    }

    #[test]
    fn test_whatsapp_url_encodes_greeting() {
        let contact = ContactConfig {
            whatsapp_number: "5511987654321".to_string(),
            ..ContactConfig::default()
        };
        let url = contact.whatsapp_url();
        assert!(url.starts_with("https://wa.me/5511987654321?text=Ol%C3%A1%21%20Vi"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_instagram_handle() {
        assert_eq!(ContactConfig::default().instagram_handle(), "@tudobacanasp");
        let contact = ContactConfig {
            instagram_url: "https://www.instagram.com/outra.loja/".to_string(),
            ..ContactConfig::default()
        };
        assert_eq!(contact.instagram_handle(), "@outra.loja");
    }

    #[test]
    fn test_parse_env_rejects_bad_port() {
        let result: Result<u16, _> = parse_env("STOREFRONT_PORT", "porta");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_parse_sample_rate_bounds() {
        assert!((parse_sample_rate("X", "0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_sample_rate("X", "1.5").is_err());
        assert!(parse_sample_rate("X", "-0.1").is_err());
    }
}
