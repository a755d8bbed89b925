//! Performance report DTO.

use serde::Serialize;

use crate::error::EngineError;
use crate::ledger::{Ledger, ValuationMode};
use crate::metrics::{
    BalanceRange, CoverageLabel, DateWindow, MoneyMetrics, RealizedCoverage, SummaryStats,
};

/// Everything a performance view shows for one mode and window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Valuation mode.
    pub mode: ValuationMode,
    /// Window the figures are restricted to.
    pub window: DateWindow,
    /// The mode's full ledger.
    pub ledger: Ledger,
    /// Outcome statistics over the window's trades.
    pub summary: SummaryStats,
    /// Money and drawdown metrics over the window's trades.
    pub money: MoneyMetrics,
    /// Broker coverage over the window's trades.
    pub coverage: RealizedCoverage,
    /// Label for Broker-mode figures.
    pub coverage_label: CoverageLabel,
    /// Deposits minus withdrawals in the window.
    pub net_cashflow: f64,
    /// Balance at the start and end of the window.
    pub balance_range: Option<BalanceRange>,
}

impl PerformanceReport {
    /// Serialize for export collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}
