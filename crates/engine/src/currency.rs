use crate::EngineError;

/// Currency used by money values.
///
/// Carteira is effectively mono-currency (`BRL`), but the engine models
/// currency explicitly to keep the money formatting/parsing rules in one
/// place and the data model future-proof.
///
/// ## Minor units
///
/// The engine stores monetary values as an `i64` number of **minor units**
/// (see [`Money`]). `minor_units()` returns how many decimal digits are used
/// when converting between:
/// - major units (human input/output, e.g. `R$ 10,50`)
/// - minor units (stored integers, e.g. `1050`)
///
/// [`Money`]: crate::Money
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Brl,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
        }
    }

    /// Symbol prefixed to formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Brl => "R$",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Brl => 2,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            other => Err(EngineError::InvalidInput(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_canonical_code() {
        assert_eq!(Currency::try_from("BRL").unwrap(), Currency::Brl);
        assert_eq!(Currency::try_from(" brl ").unwrap(), Currency::Brl);
        assert_eq!(Currency::Brl.to_string(), "BRL");
    }

    #[test]
    fn rejects_unsupported_codes() {
        assert!(Currency::try_from("EUR").is_err());
        assert!(Currency::try_from("").is_err());
    }
}
