//! Product category labels.
//!
//! Categories are free text in the database. The admin form offers a fixed
//! list of suggestions plus [`Category::OTHER`], which unlocks a custom
//! label. The sentinel itself is never stored through the form.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("category cannot be empty")]
    Empty,
    #[error("a custom category is required when \"Outros\" is selected")]
    MissingCustom,
    #[error("unknown category option: {0}")]
    UnknownOption(String),
}

/// A stored category label, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Options shown in the admin category select, in display order.
    pub const SUGGESTIONS: [&'static str; 5] = ["Bowls", "Vasos", "Conjuntos", "Canecas", "Pratos"];

    /// Select value that reveals the custom-label field.
    pub const OTHER: &'static str = "Outros";

    /// Build a category from an arbitrary label.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::Empty`] when the label is blank.
    pub fn new(label: &str) -> Result<Self, CategoryError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CategoryError::Empty);
        }
        Ok(Self(label.to_owned()))
    }

    /// Resolve the admin form's select/custom pair into the label to store.
    ///
    /// ```
    /// use tudobacana_core::Category;
    ///
    /// let picked = Category::from_choice("Vasos", "ignored").unwrap();
    /// assert_eq!(picked.as_str(), "Vasos");
    ///
    /// let custom = Category::from_choice("Outros", " Travessas ").unwrap();
    /// assert_eq!(custom.as_str(), "Travessas");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`CategoryError`] when nothing is selected, when
    /// [`Category::OTHER`] is selected with a blank custom label, or when the
    /// select value is not one of the offered options.
    pub fn from_choice(select: &str, custom: &str) -> Result<Self, CategoryError> {
        let select = select.trim();
        if select.is_empty() {
            return Err(CategoryError::Empty);
        }
        if select == Self::OTHER {
            return Self::new(custom).map_err(|_| CategoryError::MissingCustom);
        }
        if Self::SUGGESTIONS.contains(&select) {
            return Ok(Self(select.to_owned()));
        }
        Err(CategoryError::UnknownOption(select.to_owned()))
    }

    #[must_use]
    pub fn is_suggestion(&self) -> bool {
        Self::SUGGESTIONS.contains(&self.0.as_str())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The select/custom pair used to pre-fill the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryChoice {
    pub select: String,
    pub custom: String,
}

impl CategoryChoice {
    /// Split a stored label back into form fields.
    ///
    /// Suggestions select themselves. Anything else selects
    /// [`Category::OTHER`] and carries the label in the custom field.
    #[must_use]
    pub fn from_stored(category: &Category) -> Self {
        if category.is_suggestion() {
            Self {
                select: category.as_str().to_owned(),
                custom: String::new(),
            }
        } else {
            Self {
                select: Category::OTHER.to_owned(),
                custom: category.as_str().to_owned(),
            }
        }
    }

    #[must_use]
    pub fn is_other(&self) -> bool {
        self.select == Category::OTHER
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Category {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Category {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let label = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(&label)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Category {
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
    fn test_from_choice_suggestion() {
        for option in Category::SUGGESTIONS {
            let category = Category::from_choice(option, "").unwrap();
            assert_eq!(category.as_str(), option);
            assert!(category.is_suggestion());
        }
    }

    #[test]
    fn test_from_choice_other_stores_custom_label() {
        let category = Category::from_choice("Outros", "  Luminárias ").unwrap();
        assert_eq!(category.as_str(), "Luminárias");
        assert!(!category.is_suggestion());
    }

    #[test]
    fn test_from_choice_other_requires_custom() {
        assert_eq!(
            Category::from_choice("Outros", "   "),
            Err(CategoryError::MissingCustom)
        );
    }

    #[test]
    fn test_from_choice_rejects_empty_and_unknown() {
        assert_eq!(Category::from_choice("", ""), Err(CategoryError::Empty));
        assert_eq!(
            Category::from_choice("Panelas", ""),
            Err(CategoryError::UnknownOption("Panelas".to_owned()))
        );
    }

    #[test]
    fn test_choice_from_suggested_label() {
        let choice = CategoryChoice::from_stored(&Category::new("Canecas").unwrap());
        assert_eq!(choice.select, "Canecas");
        assert!(choice.custom.is_empty());
        assert!(!choice.is_other());
    }

    #[test]
    fn test_choice_from_custom_label() {
        let choice = CategoryChoice::from_stored(&Category::new("Luminárias").unwrap());
        assert_eq!(choice.select, "Outros");
        assert_eq!(choice.custom, "Luminárias");
        assert!(choice.is_other());
    }

    #[test]
    fn test_choice_round_trips_through_form() {
        let stored = Category::new("Travessas").unwrap();
        let choice = CategoryChoice::from_stored(&stored);
        let resubmitted = Category::from_choice(&choice.select, &choice.custom).unwrap();
        assert_eq!(resubmitted, stored);
    }
}
