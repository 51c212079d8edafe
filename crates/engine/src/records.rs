//! Transaction record primitives.
//!
//! A `TransactionRecord` is the persistence-ready unit the form produces: it
//! only exists after validation, so every field is already in canonical form.
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Category, EngineError, Money};

/// Opaque record identifier.
///
/// Presence on an existing record routes an edit to the update path; new
/// records get a freshly minted id (see [`IdSource`]). Uniqueness within the
/// local session is the only requirement.
///
/// [`IdSource`]: crate::IdSource
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    Expense,
    Income,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl TryFrom<&str> for RecordKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(EngineError::InvalidInput(format!(
                "invalid record kind: {other}"
            ))),
        }
    }
}

/// Calendar date in its canonical textual form, `DD/MM/AAAA`.
///
/// Only the digit-grouping shape is checked (2 digits, `/`, 2 digits, `/`,
/// 4 digits). Calendar validity is deliberately not enforced: `31/13/2024`
/// passes. The text itself is the canonical representation; no date-object
/// conversion happens on the write path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    /// Validates the `DD/MM/AAAA` shape and keeps the text unchanged.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let text = raw.trim();
        if !matches_shape(text) {
            return Err(EngineError::InvalidDateFormat(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort conversion for ordering and display grouping.
    ///
    /// Returns `None` for dates that pass the shape check but are not real
    /// calendar dates; callers must not use this for validation.
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%d/%m/%Y").ok()
    }
}

fn matches_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 2 | 5) || b.is_ascii_digit())
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, persistence-ready transaction record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: RecordId,
    pub kind: RecordKind,
    pub description: String,
    pub amount: Money,
    pub date: RecordDate,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_shape_accepts_day_month_year_grouping() {
        assert!(RecordDate::parse("31/01/2024").is_ok());
        assert!(RecordDate::parse(" 12/05/2024 ").is_ok());
    }

    #[test]
    fn date_shape_rejects_other_groupings() {
        assert_eq!(
            RecordDate::parse("2024-01-31"),
            Err(EngineError::InvalidDateFormat("2024-01-31".to_string()))
        );
        assert!(RecordDate::parse("1/1/2024").is_err());
        assert!(RecordDate::parse("31/01/24").is_err());
        assert!(RecordDate::parse("").is_err());
    }

    #[test]
    fn impossible_calendar_dates_pass_the_shape_check() {
        // Only the digit grouping is validated; 31/13/2024 is accepted.
        let date = RecordDate::parse("31/13/2024").unwrap();
        assert_eq!(date.as_str(), "31/13/2024");
        assert_eq!(date.to_naive_date(), None);
    }

    #[test]
    fn ordering_helper_parses_real_dates() {
        let date = RecordDate::parse("12/05/2024").unwrap();
        let parsed = date.to_naive_date().unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
    }

    #[test]
    fn kind_round_trips_through_its_canonical_string() {
        assert_eq!(RecordKind::try_from("expense").unwrap(), RecordKind::Expense);
        assert_eq!(RecordKind::try_from("income").unwrap(), RecordKind::Income);
        for kind in [RecordKind::Expense, RecordKind::Income] {
            assert_eq!(RecordKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(RecordKind::try_from("transfer").is_err());
    }

    #[test]
    fn record_serializes_canonical_forms() {
        let record = TransactionRecord {
            id: RecordId::from("42"),
            kind: RecordKind::Expense,
            description: "Almoço".to_string(),
            amount: Money::new(4500),
            date: RecordDate::parse("12/05/2024").unwrap(),
            category: Category::Alimentacao,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["kind"], "expense");
        assert_eq!(json["amount"], 4500);
        assert_eq!(json["date"], "12/05/2024");
        assert_eq!(json["category"], "Alimentação");
    }
}
