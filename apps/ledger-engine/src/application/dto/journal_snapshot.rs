//! Journal snapshot DTO: the immutable input of one computation pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::journal::{AccountSettings, Cashflow, Trade};
use crate::error::EngineError;

/// Document shape before per-record decoding.
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    trades: Vec<Value>,
    #[serde(default)]
    cashflows: Vec<Value>,
    #[serde(default)]
    settings: Option<Value>,
}

/// Trades, cashflows and account settings as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    /// Journaled trades, open and closed.
    #[serde(default)]
    pub trades: Vec<Trade>,
    /// Deposits and withdrawals.
    #[serde(default)]
    pub cashflows: Vec<Cashflow>,
    /// Account settings; `None` means no ledger can be built.
    #[serde(default)]
    pub settings: Option<AccountSettings>,
    /// Records dropped while decoding because required fields were missing.
    #[serde(skip)]
    pub rejected_records: usize,
}

impl JournalSnapshot {
    /// Build a snapshot from decoded records.
    #[must_use]
    pub const fn new(
        trades: Vec<Trade>,
        cashflows: Vec<Cashflow>,
        settings: Option<AccountSettings>,
    ) -> Self {
        Self {
            trades,
            cashflows,
            settings,
            rejected_records: 0,
        }
    }

    /// Decode a snapshot from a JSON document.
    ///
    /// Records are decoded one by one: a record missing a required field is
    /// dropped and counted in `rejected_records`, and settings that do not
    /// decode read as absent. Only a document that is not a JSON object
    /// with array-valued `trades` / `cashflows` is an error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] for a malformed document.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Decode a snapshot from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] for a malformed document.
    pub fn from_value(value: Value) -> Result<Self, EngineError> {
        let raw: RawSnapshot = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawSnapshot) -> Self {
        let mut rejected = 0;
        let trades = decode_records::<Trade>(raw.trades, "trade", &mut rejected);
        let cashflows = decode_records::<Cashflow>(raw.cashflows, "cashflow", &mut rejected);
        let settings = raw
            .settings
            .filter(|v| !v.is_null())
            .and_then(|value| match serde_json::from_value(value) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    warn!(error = %e, "account settings could not be decoded");
                    None
                }
            });

        Self {
            trades,
            cashflows,
            settings,
            rejected_records: rejected,
        }
    }

    /// Use `fallback` when the snapshot carries no settings.
    #[must_use]
    pub fn with_fallback_settings(mut self, fallback: Option<&AccountSettings>) -> Self {
        if self.settings.is_none() {
            self.settings = fallback.cloned();
        }
        self
    }
}

fn decode_records<T>(values: Vec<Value>, kind: &str, rejected: &mut usize) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(kind, index, error = %e, "skipping record");
                *rejected += 1;
                None
            }
        })
        .collect()
}
