//! Compute Performance Use Case

use tracing::debug;

use crate::application::dto::{JournalSnapshot, PerformanceReport};
use crate::domain::journal::AccountSettings;
use crate::ledger::{OutcomeSource, ValuationMode, compute_broker_ledger, compute_plan_ledger};
use crate::metrics::{
    DateWindow, filter_trades, money_metrics, net_cashflow, period_balance_range,
    realized_coverage, summary_stats,
};

/// Use case for building a performance report from a journal snapshot.
#[derive(Debug, Clone, Default)]
pub struct ComputePerformanceUseCase {
    default_settings: Option<AccountSettings>,
}

impl ComputePerformanceUseCase {
    /// Create a new `ComputePerformanceUseCase`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_settings: None,
        }
    }

    /// Use `settings` for snapshots that carry none.
    #[must_use]
    pub fn with_default_settings(mut self, settings: Option<AccountSettings>) -> Self {
        self.default_settings = settings;
        self
    }

    /// Execute the use case.
    ///
    /// Snapshot settings that fail validation read as absent, so the
    /// defaults apply. Returns `None` when neither holds usable settings.
    #[must_use]
    pub fn execute(
        &self,
        snapshot: &JournalSnapshot,
        mode: ValuationMode,
        window: &DateWindow,
    ) -> Option<PerformanceReport> {
        let usable = |s: &&AccountSettings| s.validate().is_ok();
        let settings = snapshot
            .settings
            .as_ref()
            .filter(usable)
            .or_else(|| self.default_settings.as_ref().filter(usable));
        let Some(settings) = settings else {
            debug!(%mode, "no usable account settings, skipping report");
            return None;
        };

        // 1. Replay both valuations
        let (plan, broker) = rayon::join(
            || compute_plan_ledger(&snapshot.trades, &snapshot.cashflows, Some(settings)),
            || compute_broker_ledger(&snapshot.trades, &snapshot.cashflows, Some(settings)),
        );
        let (plan, broker) = (plan?, broker?);

        // 2. Restrict to the window
        let trades = filter_trades(&snapshot.trades, window);

        // 3. Statistics for the requested mode
        let ledger = match mode {
            ValuationMode::Plan => plan,
            ValuationMode::Broker => broker,
        };
        let source = OutcomeSource::for_mode(mode, Some(&ledger));
        let summary = summary_stats(&trades, &source);
        let coverage = realized_coverage(&trades);
        let money = money_metrics(&trades, &ledger, &source);
        let balance_range = period_balance_range(&snapshot.trades, &ledger, window);

        debug!(
            %mode,
            trades = trades.len(),
            excluded = summary.excluded,
            replayed = ledger.len(),
            "performance report computed"
        );

        Some(PerformanceReport {
            mode,
            window: *window,
            summary,
            money,
            coverage,
            coverage_label: coverage.label(),
            net_cashflow: net_cashflow(&snapshot.cashflows, window),
            balance_range,
            ledger,
        })
    }
}
