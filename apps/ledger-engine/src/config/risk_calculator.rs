//! Risk calculator defaults.

use serde::{Deserialize, Serialize};

use crate::risk::{DEFAULT_ACCOUNT_CURRENCY, RiskCalcInput};

/// Defaults used to prefill the position-size calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCalculatorConfig {
    /// Account currency code.
    #[serde(default = "default_account_currency")]
    pub account_currency: String,
    /// Risk percent offered when the form is opened.
    #[serde(default = "default_risk_percent")]
    pub default_risk_percent: f64,
    /// Metal contract size when the broker deviates from 100 oz.
    #[serde(default)]
    pub metal_contract_size: Option<f64>,
}

impl Default for RiskCalculatorConfig {
    fn default() -> Self {
        Self {
            account_currency: default_account_currency(),
            default_risk_percent: default_risk_percent(),
            metal_contract_size: None,
        }
    }
}

impl RiskCalculatorConfig {
    /// Calculator input for `symbol` and `balance` with these defaults.
    #[must_use]
    pub fn input_for(&self, symbol: &str, balance: f64) -> RiskCalcInput {
        RiskCalcInput {
            balance: Some(balance),
            risk_percent: Some(self.default_risk_percent),
            symbol: symbol.to_string(),
            account_currency: self.account_currency.clone(),
            contract_size_override: self.metal_contract_size,
            ..RiskCalcInput::default()
        }
    }
}

fn default_account_currency() -> String {
    DEFAULT_ACCOUNT_CURRENCY.to_string()
}

const fn default_risk_percent() -> f64 {
    1.0
}
