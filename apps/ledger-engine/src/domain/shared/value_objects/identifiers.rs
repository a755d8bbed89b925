//! Strongly-typed identifiers for journal records.
//!
//! These prevent mixing up IDs from different record kinds. Hosts hand us
//! either auto-increment integers or opaque strings, so both deserialize.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Wire shape of an identifier: JSON number or JSON string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Numeric-aware comparison: integer ids sort first and by value, the rest
/// follow lexicographically. Equal numeric values fall back to the raw text
/// so the ordering stays consistent with `Eq`.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                compare_ids(&self.0, &other.0)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(TradeId, "Unique identifier for a journaled trade.");
define_id!(CashflowId, "Unique identifier for a deposit or withdrawal.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_id_new_and_display() {
        let id = TradeId::new("t-123");
        assert_eq!(id.as_str(), "t-123");
        assert_eq!(format!("{id}"), "t-123");
    }

    #[test]
    fn numeric_ids_order_by_value() {
        let mut ids = vec![TradeId::from(10), TradeId::from(9), TradeId::from(100)];
        ids.sort();
        let raw: Vec<&str> = ids.iter().map(TradeId::as_str).collect();
        assert_eq!(raw, vec!["9", "10", "100"]);
    }

    #[test]
    fn text_ids_order_lexicographically() {
        assert!(TradeId::new("abc") < TradeId::new("abd"));
        assert!(TradeId::new("10") < TradeId::new("x"));
    }

    #[test]
    fn mixed_ids_put_numbers_first() {
        let mut ids = vec![TradeId::new("1a"), TradeId::new("10"), TradeId::new("9")];
        ids.sort();
        let raw: Vec<&str> = ids.iter().map(TradeId::as_str).collect();
        assert_eq!(raw, vec!["9", "10", "1a"]);
    }

    #[test]
    fn equal_numeric_values_stay_consistent_with_eq() {
        let a = TradeId::new("7");
        let b = TradeId::new("07");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let from_num: CashflowId = serde_json::from_str("42").unwrap();
        let from_text: CashflowId = serde_json::from_str("\"cf-1\"").unwrap();
        assert_eq!(from_num.as_str(), "42");
        assert_eq!(from_text.as_str(), "cf-1");
    }

    #[test]
    fn serializes_as_string() {
        let id = TradeId::from(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"5\"");
    }
}
