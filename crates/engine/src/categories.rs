//! Fixed category set for transaction records.
//!
//! The set is closed: exactly ten categories, no dynamic extension. Lookup
//! normalizes the candidate text (NFC + case folding) before matching so
//! composed and decomposed spellings of the accented names are equivalent.
use std::fmt;

use serde::{Deserialize, Serialize, de};
use unicode_normalization::UnicodeNormalization;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Alimentacao,
    Moradia,
    Transporte,
    Saude,
    Lazer,
    Educacao,
    Vestuario,
    Servicos,
    Pets,
    Outros,
}

impl Category {
    /// The whole set, in menu order.
    pub const ALL: [Category; 10] = [
        Category::Alimentacao,
        Category::Moradia,
        Category::Transporte,
        Category::Saude,
        Category::Lazer,
        Category::Educacao,
        Category::Vestuario,
        Category::Servicos,
        Category::Pets,
        Category::Outros,
    ];

    /// Display name, as shown in the category menu.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Alimentacao => "Alimentação",
            Category::Moradia => "Moradia",
            Category::Transporte => "Transporte",
            Category::Saude => "Saúde",
            Category::Lazer => "Lazer",
            Category::Educacao => "Educação",
            Category::Vestuario => "Vestuário",
            Category::Servicos => "Serviços",
            Category::Pets => "Pets",
            Category::Outros => "Outros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let wanted = normalize(value);
        Category::ALL
            .into_iter()
            .find(|category| normalize(category.name()) == wanted)
            .ok_or_else(|| EngineError::UnknownCategory(value.trim().to_string()))
    }
}

fn normalize(value: &str) -> String {
    value.trim().nfc().collect::<String>().to_lowercase()
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Category::try_from(value.as_str()).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_display_names() {
        assert_eq!(Category::try_from("Alimentação").unwrap(), Category::Alimentacao);
        assert_eq!(Category::try_from("Pets").unwrap(), Category::Pets);
        assert_eq!(Category::ALL.len(), 10);
    }

    #[test]
    fn matching_is_case_and_normalization_insensitive() {
        assert_eq!(Category::try_from("saúde").unwrap(), Category::Saude);
        assert_eq!(Category::try_from("  Serviços ").unwrap(), Category::Servicos);
        // Decomposed "ç" (c + combining cedilla).
        assert_eq!(
            Category::try_from("Alimentac\u{327}a\u{303}o").unwrap(),
            Category::Alimentacao
        );
    }

    #[test]
    fn rejects_names_outside_the_set() {
        assert!(Category::try_from("").is_err());
        assert!(Category::try_from("Investimentos").is_err());
    }

    #[test]
    fn serde_round_trips_display_names() {
        let json = serde_json::to_string(&Category::Educacao).unwrap();
        assert_eq!(json, "\"Educação\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Educacao);
    }
}
