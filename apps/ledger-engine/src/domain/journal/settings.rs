//! Account settings that seed a ledger replay.

use serde::{Deserialize, Serialize};

use crate::domain::shared::DomainError;

/// Starting conditions for ledger replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    /// Balance before the first event.
    #[serde(alias = "starting_balance")]
    pub starting_balance: f64,
    /// Percent of the current balance risked per trade.
    #[serde(alias = "risk_percent")]
    pub risk_percent: f64,
    /// Account currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl AccountSettings {
    /// Create settings without a currency.
    #[must_use]
    pub const fn new(starting_balance: f64, risk_percent: f64) -> Self {
        Self {
            starting_balance,
            risk_percent,
            currency: None,
        }
    }

    /// Risk percent as a decimal fraction, or `None` when the settings
    /// cannot seed a ledger (non-finite or non-positive values).
    #[must_use]
    pub fn risk_fraction(&self) -> Option<f64> {
        self.validate().ok().map(|()| self.risk_percent / 100.0)
    }

    /// Check the settings.
    ///
    /// # Errors
    ///
    /// Returns error naming the first offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.starting_balance.is_finite() || self.starting_balance <= 0.0 {
            return Err(DomainError::invalid(
                "startingBalance",
                "must be a positive finite number",
            ));
        }
        if !self.risk_percent.is_finite() || self.risk_percent <= 0.0 {
            return Err(DomainError::invalid(
                "riskPercent",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}
