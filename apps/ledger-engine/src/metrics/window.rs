//! Date windows, period views and equity curves.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::ledger_slice;
use crate::domain::journal::{Cashflow, Trade};
use crate::domain::shared::{Timestamp, TradeId};
use crate::ledger::Ledger;

/// Trailing period presets offered by period pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodPreset {
    /// Since midnight UTC.
    Today,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    /// Last 90 days.
    ThreeMonths,
    /// Last 180 days.
    SixMonths,
    /// Last 365 days.
    Year,
    /// No restriction.
    All,
}

impl PeriodPreset {
    /// Trailing length in days; `None` for `Today` and `All`.
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::ThreeMonths => Some(90),
            Self::SixMonths => Some(180),
            Self::Year => Some(365),
            Self::Today | Self::All => None,
        }
    }
}

/// Inclusive time window over `closedAt` / `occurredAt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DateWindow {
    /// Everything.
    #[default]
    AllTime,
    /// Between optional inclusive bounds.
    Between {
        /// Lower bound.
        from: Option<Timestamp>,
        /// Upper bound.
        to: Option<Timestamp>,
    },
}

impl DateWindow {
    /// Window between two bounds.
    #[must_use]
    pub const fn between(from: Option<Timestamp>, to: Option<Timestamp>) -> Self {
        Self::Between { from, to }
    }

    /// Window for a preset ending at `now`.
    #[must_use]
    pub fn trailing(preset: PeriodPreset, now: Timestamp) -> Self {
        let from = match preset {
            PeriodPreset::All => return Self::AllTime,
            PeriodPreset::Today => Some(now.date().and_time(chrono::NaiveTime::default()).and_utc()),
            other => {
                let days = other.days().unwrap_or_default();
                // Out of chrono's range: leave the lower bound open.
                now.as_datetime().checked_sub_signed(Duration::days(days))
            }
        };
        Self::Between {
            from: from.map(Timestamp::new),
            to: Some(now),
        }
    }

    /// Whether the window has no effective bounds.
    #[must_use]
    pub const fn is_all_time(&self) -> bool {
        matches!(
            self,
            Self::AllTime | Self::Between { from: None, to: None }
        )
    }

    /// Whether `at` lies in the window.
    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        match self {
            Self::AllTime => true,
            Self::Between { from, to } => {
                from.is_none_or(|from| at >= from) && to.is_none_or(|to| at <= to)
            }
        }
    }

    /// Whether an optional time lies in the window. Undated records only
    /// belong to unbounded windows.
    #[must_use]
    pub fn contains_opt(&self, at: Option<Timestamp>) -> bool {
        match at {
            Some(at) => self.contains(at),
            None => self.is_all_time(),
        }
    }
}

/// Closed trades whose `closedAt` lies in `window`.
#[must_use]
pub fn filter_trades(trades: &[Trade], window: &DateWindow) -> Vec<Trade> {
    trades
        .iter()
        .filter(|t| t.closed_at.is_some_and(|at| window.contains(at)))
        .cloned()
        .collect()
}

/// Deposits minus withdrawals in `window`.
#[must_use]
pub fn net_cashflow(cashflows: &[Cashflow], window: &DateWindow) -> f64 {
    cashflows
        .iter()
        .filter(|c| window.contains_opt(c.occurred_at))
        .filter_map(Cashflow::signed_amount)
        .sum()
}

/// Balance at the start and end of a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRange {
    /// Balance before the first trade in the period.
    pub start: f64,
    /// Balance after the last trade in the period.
    pub end: f64,
}

/// Balance range over `window`.
///
/// An unbounded window is the ledger's own starting and ending balance.
/// Otherwise it spans the replayed trades closed in the window, and is
/// `None` when there are none.
#[must_use]
pub fn period_balance_range(
    trades: &[Trade],
    ledger: &Ledger,
    window: &DateWindow,
) -> Option<BalanceRange> {
    if window.is_all_time() {
        return Some(BalanceRange {
            start: ledger.starting_balance,
            end: ledger.ending_balance,
        });
    }
    let in_window = filter_trades(trades, window);
    let slice = ledger_slice(&in_window, ledger);
    let (_, first) = slice.first()?;
    let (_, last) = slice.last()?;
    Some(BalanceRange {
        start: first.balance_before,
        end: last.balance_after,
    })
}

/// One point of the per-trade equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityPoint {
    /// Trade close time.
    pub timestamp: Timestamp,
    /// Trade.
    pub trade_id: TradeId,
    /// Trade P&L.
    pub pnl: f64,
    /// Balance after the trade.
    pub equity: f64,
    /// Decline from the running peak in percent.
    pub drawdown_pct: f64,
}

/// Per-trade equity curve in `(closedAt, id)` order.
#[must_use]
pub fn equity_curve(trades: &[Trade], ledger: &Ledger) -> Vec<EquityPoint> {
    let slice = ledger_slice(trades, ledger);
    let mut peak = slice
        .first()
        .map_or(ledger.starting_balance, |(_, e)| e.balance_before);

    slice
        .into_iter()
        .filter_map(|(trade, entry)| {
            let timestamp = trade.closed_at?;
            peak = peak.max(entry.balance_after);
            let drawdown_pct = if peak > 0.0 {
                (entry.balance_after - peak) / peak * 100.0
            } else {
                0.0
            };
            Some(EquityPoint {
                timestamp,
                trade_id: trade.id.clone(),
                pnl: entry.pnl_money,
                equity: entry.balance_after,
                drawdown_pct,
            })
        })
        .collect()
}

/// Equity aggregated per UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEquityPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Sum of P&L closed that day.
    pub pnl: f64,
    /// Equity after the day's last trade.
    pub equity: f64,
    /// Trades closed that day.
    pub trade_count: usize,
}

/// Group an equity curve by UTC date.
#[must_use]
pub fn daily_equity(points: &[EquityPoint]) -> Vec<DailyEquityPoint> {
    let mut days: BTreeMap<NaiveDate, DailyEquityPoint> = BTreeMap::new();
    for point in points {
        let date = point.timestamp.date();
        let day = days.entry(date).or_insert(DailyEquityPoint {
            date,
            pnl: 0.0,
            equity: point.equity,
            trade_count: 0,
        });
        day.pnl += point.pnl;
        day.equity = point.equity;
        day.trade_count += 1;
    }
    days.into_values().collect()
}
