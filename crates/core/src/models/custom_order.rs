//! Custom-order requests sent through the storefront.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::types::CustomOrderId;

/// Brasília time, which has had no daylight saving since 2019.
const BRASILIA_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// A request for a bespoke piece. Read-only from the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrder {
    pub id: CustomOrderId,
    pub name: String,
    /// Stored as written. Rows may predate the current `Email` rules.
    pub email: String,
    pub whatsapp: Option<String>,
    pub description: String,
    /// Free-text workflow label. New rows default to `pendente`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl CustomOrder {
    /// Submission date as `dd/mm/aaaa` in Brasília time.
    #[must_use]
    pub fn created_on(&self) -> String {
        FixedOffset::west_opt(BRASILIA_UTC_OFFSET_SECS).map_or_else(
            || self.created_at.format("%d/%m/%Y").to_string(),
            |offset| {
                self.created_at
                    .with_timezone(&offset)
                    .format("%d/%m/%Y")
                    .to_string()
            },
        )
    }

    /// Digits of the WhatsApp number, for building `wa.me` links.
    #[must_use]
    pub fn whatsapp_digits(&self) -> Option<String> {
        let digits: String = self
            .whatsapp
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        (!digits.is_empty()).then_some(digits)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn order(created_at: DateTime<Utc>, whatsapp: Option<&str>) -> CustomOrder {
        CustomOrder {
            id: CustomOrderId::from_u128(1),
            name: "Marina".to_owned(),
            email: "marina@example.com".to_owned(),
            whatsapp: whatsapp.map(str::to_owned),
            description: "Jogo de xícaras azuis".to_owned(),
            status: "pendente".to_owned(),
            created_at,
        }
    }

    #[test]
    fn test_created_on_uses_brazilian_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap();
        assert_eq!(order(at, None).created_on(), "09/03/2024");
    }

    #[test]
    fn test_created_on_shifts_to_brasilia() {
        // 01:30 UTC is still the previous evening in Brasília.
        let at = Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap();
        assert_eq!(order(at, None).created_on(), "09/03/2024");
    }

    #[test]
    fn test_whatsapp_digits() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap();
        assert_eq!(
            order(at, Some("(11) 98765-4321")).whatsapp_digits().as_deref(),
            Some("11987654321")
        );
        assert_eq!(order(at, Some(" - ")).whatsapp_digits(), None);
        assert_eq!(order(at, None).whatsapp_digits(), None);
    }
}
