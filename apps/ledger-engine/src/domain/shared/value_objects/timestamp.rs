//! Timestamp value object for temporal data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A UTC timestamp for journal records and ledger events.
///
/// Accepted text forms (all interpreted as UTC unless an offset is given):
/// - RFC 3339: `2024-03-01T10:00:00Z`, `2024-03-01T12:00:00+02:00`
/// - naive: `2024-03-01T10:00:00`, `2024-03-01 10:00:00`, with optional fraction
/// - date only: `2024-03-01` (midnight)
///
/// JSON numbers are read as Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl Timestamp {
    /// Create a new Timestamp from a DateTime<Utc>.
    #[must_use]
    pub const fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the current timestamp.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse any of the accepted text forms.
    ///
    /// # Errors
    ///
    /// Returns error if the string matches none of the accepted forms.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let s = s.trim();
        let rfc = DateTime::parse_from_rfc3339(s);
        if let Ok(dt) = rfc {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(naive.and_utc()));
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Ok(Self(date.and_time(NaiveTime::default()).and_utc()))
    }

    /// Build from Unix epoch milliseconds. `None` when out of range.
    #[must_use]
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Get the inner DateTime<Utc>.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Format as ISO 8601 / RFC 3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Get the Unix timestamp in milliseconds.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// UTC calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Calculate duration since another timestamp.
    #[must_use]
    pub fn duration_since(&self, other: Self) -> chrono::Duration {
        self.0 - other.0
    }
}

/// Wire shape of a timestamp.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    pub(crate) fn resolve(self) -> Option<Timestamp> {
        match self {
            Self::Millis(ms) => Timestamp::from_unix_millis(ms),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(ms) if ms.is_finite() => Timestamp::from_unix_millis(ms as i64),
            Self::Float(_) => None,
            Self::Text(s) => Timestamp::parse(&s).ok(),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawTimestamp::deserialize(deserializer)?
            .resolve()
            .ok_or_else(|| serde::de::Error::custom("unrecognised timestamp"))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
