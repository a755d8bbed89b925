//! Input and result types for the position-size calculator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::journal::Direction;

/// Account currency used when the caller gives none.
pub const DEFAULT_ACCOUNT_CURRENCY: &str = "USD";

/// Calculator inputs. Every numeric field is optional because the form
/// that feeds it may be half filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalcInput {
    /// Account balance.
    pub balance: Option<f64>,
    /// Percent of balance to risk.
    pub risk_percent: Option<f64>,
    /// Instrument code.
    pub symbol: String,
    /// Planned entry price.
    pub entry_price: Option<f64>,
    /// Planned stop-loss price.
    pub stop_loss_price: Option<f64>,
    /// Account currency code.
    pub account_currency: String,
    /// Quote-to-account rate, required when the account currency is on
    /// neither side of the pair.
    pub conversion_rate: Option<f64>,
    /// Broker contract size for metals.
    pub contract_size_override: Option<f64>,
}

impl Default for RiskCalcInput {
    fn default() -> Self {
        Self {
            balance: None,
            risk_percent: None,
            symbol: String::new(),
            entry_price: None,
            stop_loss_price: None,
            account_currency: DEFAULT_ACCOUNT_CURRENCY.to_string(),
            conversion_rate: None,
            contract_size_override: None,
        }
    }
}

impl RiskCalcInput {
    /// Input for `symbol` with the given balance and risk.
    #[must_use]
    pub fn new(symbol: impl Into<String>, balance: f64, risk_percent: f64) -> Self {
        Self {
            symbol: symbol.into(),
            balance: Some(balance),
            risk_percent: Some(risk_percent),
            ..Self::default()
        }
    }

    /// Set entry and stop prices.
    #[must_use]
    pub const fn with_prices(mut self, entry: f64, stop_loss: f64) -> Self {
        self.entry_price = Some(entry);
        self.stop_loss_price = Some(stop_loss);
        self
    }

    /// Set the account currency.
    #[must_use]
    pub fn with_account_currency(mut self, currency: impl Into<String>) -> Self {
        self.account_currency = currency.into();
        self
    }

    /// Set the conversion rate.
    #[must_use]
    pub const fn with_conversion_rate(mut self, rate: f64) -> Self {
        self.conversion_rate = Some(rate);
        self
    }

    /// Set the metal contract size.
    #[must_use]
    pub const fn with_contract_size(mut self, size: f64) -> Self {
        self.contract_size_override = Some(size);
        self
    }
}

/// Input field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskInputField {
    /// Balance missing or not positive.
    Balance,
    /// Risk percent missing or not positive.
    RiskPercent,
    /// Entry price missing or not positive.
    EntryPrice,
    /// Stop price missing or not positive.
    StopLossPrice,
    /// Entry equals stop.
    StopDistance,
    /// Conversion needed but rate missing or not positive.
    ConversionRate,
}

impl fmt::Display for RiskInputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Balance => "balance",
            Self::RiskPercent => "riskPercent",
            Self::EntryPrice => "entryPrice",
            Self::StopLossPrice => "stopLossPrice",
            Self::StopDistance => "stopDistance",
            Self::ConversionRate => "conversionRate",
        };
        f.write_str(name)
    }
}

/// Calculator output.
///
/// Figures whose inputs failed validation are `None`; the flags and
/// `invalid_fields` say which input is at fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCalcResult {
    /// `base_valid && conversion_rate_valid`.
    pub is_valid: bool,
    /// Balance, risk, prices and stop distance are usable.
    pub base_valid: bool,
    /// Conversion rate is usable, or not needed.
    pub conversion_rate_valid: bool,
    /// Account currency is on neither side of the pair.
    pub needs_conversion: bool,
    /// Base currency of the instrument.
    pub base_currency: Option<String>,
    /// Quote currency of the instrument.
    pub quote_currency: Option<String>,
    /// Instrument tick size.
    pub pip_size: f64,
    /// Units in one lot after any contract-size override.
    pub units_per_lot: f64,
    /// `|entry - stop|`.
    pub sl_distance: Option<f64>,
    /// Long when entry is above stop.
    pub direction: Option<Direction>,
    /// Stop distance in ticks.
    pub sl_pips: Option<f64>,
    /// Value of one tick per unit, in account currency.
    pub pip_value_per_unit: Option<f64>,
    /// `balance * risk% / 100`.
    pub risk_amount: Option<f64>,
    /// Position size in units.
    pub units: Option<f64>,
    /// Position size in lots.
    pub lots: Option<f64>,
    /// Price at 2R.
    #[serde(rename = "target2R")]
    pub target_2r: Option<f64>,
    /// Price at 3R.
    #[serde(rename = "target3R")]
    pub target_3r: Option<f64>,
    /// Inputs that failed validation.
    pub invalid_fields: Vec<RiskInputField>,
}
