//! Performance metrics over a replayed ledger.
//!
//! - [`summary`]: win/loss/breakeven counts, average R, confidence, coverage
//! - [`money`]: P&L, return, drawdown and loss streak over a trade slice
//! - [`window`]: date windows, period balances and equity curves
//!
//! Inputs are already-replayed ledgers; nothing here re-runs the replay.

pub mod money;
pub mod summary;
pub mod window;

pub use money::{MoneyMetrics, ledger_slice, money_metrics};
pub use summary::{CoverageLabel, RealizedCoverage, SummaryStats, realized_coverage, summary_stats};
pub use window::{
    BalanceRange, DailyEquityPoint, DateWindow, EquityPoint, PeriodPreset, daily_equity,
    equity_curve, filter_trades, net_cashflow, period_balance_range,
};
