use std::ops::{Add, AddAssign, Neg};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError};

/// Signed money amount represented as **integer centavos**.
///
/// Use this type for **all** monetary values in the engine (balances, record
/// amounts) to avoid floating-point drift.
///
/// The value is signed:
/// - positive = income / increase
/// - negative = expense / decrease
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format(Currency::Brl), "R$ 12,34");
/// ```
///
/// Parsing from user input (accepts an optional `R$` prefix, `.` as the
/// thousands separator and `,` as the decimal separator):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::parse_major("R$ 1.234,56", Currency::Brl).unwrap();
/// assert_eq!(amount.minor(), 123_456);
/// assert!(Money::parse_major("12,345", Currency::Brl).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Formats the amount in major units: symbol, `.` thousands grouping,
    /// `,` decimal separator (`R$ 1.234,56`, negative as `-R$ 10,50`).
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let divisor = 10u64.pow(u32::from(currency.minor_units()));
        let major = abs / divisor;
        let cents = abs % divisor;
        format!(
            "{sign}{} {},{cents:0width$}",
            currency.symbol(),
            group_thousands(major),
            width = currency.minor_units() as usize,
        )
    }

    /// Parses locale-formatted major-unit text into minor units.
    ///
    /// Accepts an optional currency symbol prefix, an optional leading
    /// `+`/`-`, `.` as the thousands separator and `,` as the decimal
    /// separator.
    ///
    /// Validation rules:
    /// - thousands groups, when present, must be well formed (`1.234.567`)
    /// - at most `minor_units` fraction digits (rejects `12,345`)
    /// - rejects empty/invalid strings
    ///
    /// Positivity is not enforced here: `0,00` parses to zero. Callers that
    /// require a positive amount (the record builder does) check the parsed
    /// value.
    pub fn parse_major(raw: &str, currency: Currency) -> Result<Money, EngineError> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let mut rest = raw.trim();
        if let Some(stripped) = rest.strip_prefix(currency.symbol()) {
            rest = stripped.trim_start();
        }
        if rest.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = rest.strip_prefix('-') {
            (-1i64, stripped.trim_start())
        } else if let Some(stripped) = rest.strip_prefix('+') {
            (1i64, stripped.trim_start())
        } else {
            (1i64, rest)
        };
        if rest.is_empty() {
            return Err(empty());
        }

        let mut parts = rest.split(',');
        let major_raw = parts.next().ok_or_else(invalid)?;
        let frac_raw = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        let major: i64 = parse_grouped(major_raw)
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| overflow())?;

        let max_frac = currency.minor_units() as usize;
        let cents: i64 = match frac_raw {
            None | Some("") => 0,
            Some(frac) => {
                if frac.len() > max_frac || !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let scale = 10i64.pow((max_frac - frac.len()) as u32);
                frac.parse::<i64>().map_err(|_| invalid())? * scale
            }
        };

        let divisor = 10i64.pow(u32::from(currency.minor_units()));
        let total = major
            .checked_mul(divisor)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

/// Validates `.`-separated thousands groups and returns the bare digits.
fn parse_grouped(major_raw: &str) -> Option<String> {
    let mut groups = major_raw.split('.');
    let first = groups.next()?;
    if first.is_empty() || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut digits = String::from(first);
    let mut grouped = false;
    for group in groups {
        grouped = true;
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    if grouped && first.len() > 3 {
        return None;
    }
    Some(digits)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_groups_thousands() {
        assert_eq!(Money::new(0).format(Currency::Brl), "R$ 0,00");
        assert_eq!(Money::new(1).format(Currency::Brl), "R$ 0,01");
        assert_eq!(Money::new(1050).format(Currency::Brl), "R$ 10,50");
        assert_eq!(Money::new(123_456).format(Currency::Brl), "R$ 1.234,56");
        assert_eq!(
            Money::new(100_000_000_000).format(Currency::Brl),
            "R$ 1.000.000.000,00"
        );
        assert_eq!(Money::new(-1050).format(Currency::Brl), "-R$ 10,50");
    }

    #[test]
    fn parse_strips_symbol_and_separators() {
        assert_eq!(
            Money::parse_major("R$ 1.234,56", Currency::Brl).unwrap().minor(),
            123_456
        );
        assert_eq!(
            Money::parse_major("  R$ 45,00 ", Currency::Brl).unwrap().minor(),
            4500
        );
        assert_eq!(Money::parse_major("10", Currency::Brl).unwrap().minor(), 1000);
        assert_eq!(Money::parse_major("10,5", Currency::Brl).unwrap().minor(), 1050);
        assert_eq!(
            Money::parse_major("1.234.567,89", Currency::Brl).unwrap().minor(),
            123_456_789
        );
        assert_eq!(Money::parse_major("-0,01", Currency::Brl).unwrap().minor(), -1);
    }

    #[test]
    fn parse_accepts_zero() {
        let zero = Money::parse_major("0,00", Currency::Brl).unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert!(Money::parse_major("", Currency::Brl).is_err());
        assert!(Money::parse_major("R$ ", Currency::Brl).is_err());
        assert!(Money::parse_major("abc", Currency::Brl).is_err());
        assert!(Money::parse_major("12,345", Currency::Brl).is_err());
        assert!(Money::parse_major("1,2,3", Currency::Brl).is_err());
        assert!(Money::parse_major("1.23,45", Currency::Brl).is_err());
        assert!(Money::parse_major("1234.567,89", Currency::Brl).is_err());
    }

    #[test]
    fn arithmetic_in_minor_units() {
        let mut total = Money::ZERO;
        total += Money::new(4500);
        assert_eq!((total + Money::new(500)).minor(), 5000);
        assert_eq!((-total).minor(), -4500);
        assert!(Money::new(i64::MAX).checked_add(Money::new(1)).is_none());
    }
}
