//! Forgiving deserializers for optional record fields.
//!
//! Journal records come from several collaborators (manual entry, broker
//! imports) and optional fields are frequently null, blank, or strings.
//! These helpers map anything unusable to `None` instead of failing the
//! whole record.

use serde::{Deserialize, Deserializer};

use super::value_objects::{RawTimestamp, Timestamp};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Known(T),
    Other(serde_json::Value),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

/// Optional number: JSON number or numeric string, else `None`.
///
/// Non-finite results are dropped as well.
pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Loose::<RawNumber>::deserialize(deserializer)? {
        Loose::Known(RawNumber::Number(n)) => Some(n),
        Loose::Known(RawNumber::Text(s)) => s.trim().parse::<f64>().ok(),
        Loose::Other(_) => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

/// Optional timestamp in any form [`Timestamp`] accepts, else `None`.
pub fn option_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::<RawTimestamp>::deserialize(deserializer)? {
        Loose::Known(raw) => raw.resolve(),
        Loose::Other(_) => None,
    })
}

/// Optional value of any deserializable type; mismatches become `None`.
///
/// Used for enum fields where an unknown spelling should read as absent.
pub fn option_of<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Loose::<T>::deserialize(deserializer)? {
        Loose::Known(value) => Some(value),
        Loose::Other(_) => None,
    })
}

/// Optional text; blank strings become `None`.
pub fn option_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::<String>::deserialize(deserializer)? {
        Loose::Known(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}
