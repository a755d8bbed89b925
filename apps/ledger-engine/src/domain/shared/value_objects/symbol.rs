//! Symbol value object for instrument codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A trading symbol such as `EURUSD` or `XAUUSD`.
///
/// Normalized to uppercase with separators removed, so `eur/usd`,
/// `EUR-USD` and `EURUSD` are the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new Symbol.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let normalized = value
            .into()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_uppercase();
        Self(normalized)
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a six-letter code into `(base, quote)` currencies.
    ///
    /// Returns `None` for anything that is not exactly six ASCII letters.
    #[must_use]
    pub fn currency_pair(&self) -> Option<(&str, &str)> {
        let s = self.0.as_str();
        if s.len() == 6 && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(s.split_at(3))
        } else {
            None
        }
    }

    /// Validate the symbol.
    ///
    /// # Errors
    ///
    /// Returns error if symbol is empty or exceeds the maximum length.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: "Symbol cannot be empty".to_string(),
            });
        }

        if self.0.len() > 21 {
            return Err(DomainError::InvalidValue {
                field: "symbol".to_string(),
                message: "Symbol exceeds maximum length".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_new_normalizes_case_and_separators() {
        assert_eq!(Symbol::new("eurusd").as_str(), "EURUSD");
        assert_eq!(Symbol::new("EUR/USD").as_str(), "EURUSD");
        assert_eq!(Symbol::new(" gbp-jpy ").as_str(), "GBPJPY");
    }

    #[test]
    fn symbol_currency_pair_splits_three_three() {
        assert_eq!(Symbol::new("EURUSD").currency_pair(), Some(("EUR", "USD")));
        assert_eq!(Symbol::new("usdjpy").currency_pair(), Some(("USD", "JPY")));
    }

    #[test]
    fn symbol_currency_pair_rejects_other_shapes() {
        assert_eq!(Symbol::new("US30").currency_pair(), None);
        assert_eq!(Symbol::new("EURUSDX").currency_pair(), None);
        assert_eq!(Symbol::new("EUR1SD").currency_pair(), None);
    }

    #[test]
    fn symbol_validate() {
        assert!(Symbol::new("").validate().is_err());
        assert!(Symbol::new("A".repeat(25)).validate().is_err());
        assert!(Symbol::new("XAUUSD").validate().is_ok());
    }

    #[test]
    fn symbol_serde_normalizes_on_read() {
        let parsed: Symbol = serde_json::from_str("\"eur/usd\"").unwrap();
        assert_eq!(parsed.as_str(), "EURUSD");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"EURUSD\"");
    }
}
