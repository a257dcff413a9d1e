//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain exactly one @ symbol")]
    AtSymbol,
    #[error("email cannot contain whitespace")]
    Whitespace,
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain is empty or lacks a dotted host name.
    #[error("email domain is invalid")]
    InvalidDomain,
}

/// An email address.
///
/// Input is trimmed before validation. The accepted shape is
/// `local@host.tld`: one `@`, no whitespace, and a domain holding at least
/// one interior dot.
///
/// ```
/// use tudobacana_core::Email;
///
/// assert!(Email::parse("  cliente@tudobacana.com ").is_ok());
/// assert!(Email::parse("cliente@localhost").is_err());
/// assert!(Email::parse("cli ente@tudobacana.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first rule the trimmed input
    /// breaks.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let mut parts = s.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(EmailError::AtSymbol);
        };

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        let dotted: Vec<&str> = domain.split('.').collect();
        if dotted.len() < 2 || dotted.iter().any(|label| label.is_empty()) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit('@').next().unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Email {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Email {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        // Rows written before validation existed are still readable.
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Email {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("contato@tudobacana.com").is_ok());
        assert!(Email::parse("maria.silva+ceramica@gmail.com").is_ok());
        assert!(Email::parse("ana@loja.com.br").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        let email = Email::parse("  ana@loja.com.br\n").unwrap();
        assert_eq!(email.as_str(), "ana@loja.com.br");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_at_symbol() {
        assert_eq!(Email::parse("sem-arroba"), Err(EmailError::AtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::AtSymbol));
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            Email::parse("ana maria@loja.com"),
            Err(EmailError::Whitespace)
        );
    }

    #[test]
    fn test_parse_empty_local_part() {
        assert_eq!(Email::parse("@loja.com"), Err(EmailError::EmptyLocalPart));
    }

    #[test]
    fn test_parse_invalid_domain() {
        assert_eq!(Email::parse("ana@"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("ana@localhost"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("ana@loja."), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("ana@.com"), Err(EmailError::InvalidDomain));
    }

    #[test]
    fn test_domain() {
        let email = Email::parse("ana@loja.com.br").unwrap();
        assert_eq!(email.domain(), "loja.com.br");
    }

    #[test]
    fn test_serde_transparent() {
        let email = Email::parse("ana@loja.com.br").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"ana@loja.com.br\"");
    }
}
