//! Money, drawdown and loss-streak metrics over a slice of trades.

use serde::{Deserialize, Serialize};

use crate::domain::journal::Trade;
use crate::ledger::{BREAKEVEN_EPSILON, Ledger, LedgerEntry, OutcomeSource};

/// Money metrics for a trade slice. Every figure is `None` when there is
/// no usable data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyMetrics {
    /// Trades walked.
    pub trade_count: usize,
    /// Sum of ledger P&L.
    pub total_pnl: Option<f64>,
    /// `total_pnl / start_equity * 100`.
    pub return_pct: Option<f64>,
    /// Deepest peak-to-trough decline in percent; always `<= 0`.
    pub max_drawdown_pct: Option<f64>,
    /// Most negative running R sum over consecutive losses.
    pub loss_streak_r: Option<f64>,
    /// First trade's `balance_before`.
    pub start_equity: Option<f64>,
    /// `start_equity + total_pnl`.
    pub end_equity: Option<f64>,
    /// Sum of winning P&L.
    pub gross_profit: Option<f64>,
    /// Sum of losing P&L, as a positive number.
    pub gross_loss: Option<f64>,
    /// `gross_profit / gross_loss`; `None` without losses.
    pub profit_factor: Option<f64>,
}

impl MoneyMetrics {
    /// Result for an empty or unusable slice.
    #[must_use]
    pub fn no_data() -> Self {
        Self::default()
    }

    /// Whether any trade was walked.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.trade_count > 0
    }
}

/// Trades of `trades` replayed in `ledger`, sorted by `(closedAt, id)`.
///
/// Sorting here keeps the result independent of the ledger's own event
/// order, so any filtered slice works.
#[must_use]
pub fn ledger_slice<'a>(trades: &'a [Trade], ledger: &'a Ledger) -> Vec<(&'a Trade, &'a LedgerEntry)> {
    let mut slice: Vec<_> = trades
        .iter()
        .filter_map(|trade| ledger.entry(&trade.id).map(|entry| (trade, entry)))
        .collect();
    slice.sort_by(|(a, _), (b, _)| a.closed_at.cmp(&b.closed_at).then_with(|| a.id.cmp(&b.id)));
    slice
}

/// Equity, drawdown and loss-streak metrics for `trades` under `ledger`.
///
/// R for the loss streak comes from `source`; trades it cannot resolve use
/// the strategy R they were replayed with.
#[must_use]
pub fn money_metrics(trades: &[Trade], ledger: &Ledger, source: &OutcomeSource<'_>) -> MoneyMetrics {
    let slice = ledger_slice(trades, ledger);
    let Some(start_equity) = slice
        .first()
        .map(|(_, entry)| entry.balance_before)
        .filter(|b| b.is_finite() && *b > 0.0)
    else {
        return MoneyMetrics::no_data();
    };

    let mut equity = start_equity;
    let mut peak = start_equity;
    let mut max_drawdown_pct: f64 = 0.0;
    let mut total_pnl = 0.0;
    let mut gross_profit = 0.0;
    let mut gross_loss = 0.0;
    let mut run_r = 0.0;
    let mut worst_run_r: f64 = 0.0;

    for (trade, entry) in &slice {
        let pnl = entry.pnl_money;
        total_pnl += pnl;
        if pnl > 0.0 {
            gross_profit += pnl;
        } else if pnl < 0.0 {
            gross_loss -= pnl;
        }

        equity += pnl;
        peak = peak.max(equity);
        let drawdown = (equity - peak) / peak * 100.0;
        max_drawdown_pct = max_drawdown_pct.min(drawdown);

        let r = source.resolve(trade).unwrap_or(entry.r_multiple);
        if r < -BREAKEVEN_EPSILON {
            run_r += r;
            worst_run_r = worst_run_r.min(run_r);
        } else {
            run_r = 0.0;
        }
    }

    MoneyMetrics {
        trade_count: slice.len(),
        total_pnl: Some(total_pnl),
        return_pct: Some(total_pnl / start_equity * 100.0),
        max_drawdown_pct: Some(max_drawdown_pct),
        loss_streak_r: Some(worst_run_r),
        start_equity: Some(start_equity),
        end_equity: Some(equity),
        gross_profit: Some(gross_profit),
        gross_loss: Some(gross_loss),
        profit_factor: (gross_loss > 0.0).then(|| gross_profit / gross_loss),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::{AccountSettings, Cashflow, CashflowType, Direction};
    use crate::domain::shared::Timestamp;
    use crate::ledger::compute_plan_ledger;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn trade_with_r(id: &str, r: f64, closed: &str) -> Trade {
        Trade::open(id, "EURUSD", Direction::Long, 100.0, at("2024-01-01"))
            .with_stop_loss(90.0)
            .closed(100.0 + 10.0 * r, at(closed))
    }

    fn plan(trades: &[Trade]) -> Ledger {
        compute_plan_ledger(trades, &[], Some(&AccountSettings::new(10_000.0, 1.0))).unwrap()
    }

    #[test]
    fn empty_slice_is_no_data() {
        let ledger = plan(&[]);
        let metrics = money_metrics(&[], &ledger, &OutcomeSource::Strategy);
        assert_eq!(metrics, MoneyMetrics::no_data());
        assert!(!metrics.has_data());
    }

    #[test]
    fn trades_outside_the_ledger_are_ignored() {
        let ledger = plan(&[]);
        let trades = vec![trade_with_r("1", 1.0, "2024-01-02")];
        assert!(!money_metrics(&trades, &ledger, &OutcomeSource::Strategy).has_data());
    }

    #[test]
    fn non_positive_start_equity_is_no_data() {
        let trades = vec![trade_with_r("1", 1.0, "2024-01-03")];
        let cashflows = vec![Cashflow::new(
            "1",
            CashflowType::Withdrawal,
            12_000.0,
            at("2024-01-02"),
        )];
        let ledger = compute_plan_ledger(
            &trades,
            &cashflows,
            Some(&AccountSettings::new(10_000.0, 1.0)),
        )
        .unwrap();
        assert!(ledger.entry(&"1".into()).unwrap().balance_before < 0.0);

        let metrics = money_metrics(&trades, &ledger, &OutcomeSource::Strategy);
        assert_eq!(metrics, MoneyMetrics::no_data());
    }

    #[test]
    fn totals_and_return() {
        let trades = vec![
            trade_with_r("1", 2.0, "2024-01-02"),
            trade_with_r("2", -1.0, "2024-01-03"),
        ];
        let ledger = plan(&trades);
        let m = money_metrics(&trades, &ledger, &OutcomeSource::Strategy);

        assert_eq!(m.trade_count, 2);
        assert!((m.total_pnl.unwrap() - 98.0).abs() < 1e-9);
        assert!((m.return_pct.unwrap() - 0.98).abs() < 1e-9);
        assert!((m.end_equity.unwrap() - 10_098.0).abs() < 1e-9);
        assert!((m.gross_profit.unwrap() - 200.0).abs() < 1e-9);
        assert!((m.gross_loss.unwrap() - 102.0).abs() < 1e-9);
        assert!((m.profit_factor.unwrap() - 200.0 / 102.0).abs() < 1e-9);
    }

    #[test]
    fn drawdown_is_measured_from_running_peak() {
        let trades = vec![
            trade_with_r("1", 2.0, "2024-01-02"),
            trade_with_r("2", -1.0, "2024-01-03"),
            trade_with_r("3", -1.0, "2024-01-04"),
            trade_with_r("4", 3.0, "2024-01-05"),
        ];
        let ledger = plan(&trades);
        let m = money_metrics(&trades, &ledger, &OutcomeSource::Strategy);

        let peak = 10_200.0;
        let trough = 10_200.0 - 102.0 - 100.98;
        let expected = (trough - peak) / peak * 100.0;
        assert!((m.max_drawdown_pct.unwrap() - expected).abs() < 1e-9);
        assert!(m.max_drawdown_pct.unwrap() < 0.0);
    }

    #[test]
    fn loss_streak_is_worst_consecutive_sum() {
        let trades = vec![
            trade_with_r("1", -1.0, "2024-01-02"),
            trade_with_r("2", -0.5, "2024-01-03"),
            trade_with_r("3", 0.0, "2024-01-04"),
            trade_with_r("4", -1.0, "2024-01-05"),
            trade_with_r("5", 2.0, "2024-01-06"),
        ];
        let ledger = plan(&trades);
        let m = money_metrics(&trades, &ledger, &OutcomeSource::Strategy);
        assert!((m.loss_streak_r.unwrap() + 1.5).abs() < 1e-12);
    }

    #[test]
    fn only_winners_have_no_drawdown_or_profit_factor() {
        let trades = vec![trade_with_r("1", 1.0, "2024-01-02")];
        let ledger = plan(&trades);
        let m = money_metrics(&trades, &ledger, &OutcomeSource::Strategy);
        assert_eq!(m.max_drawdown_pct, Some(0.0));
        assert_eq!(m.loss_streak_r, Some(0.0));
        assert_eq!(m.profit_factor, None);
    }

    #[test]
    fn slice_starts_from_ledger_balance() {
        let trades = vec![
            trade_with_r("1", 2.0, "2024-01-02"),
            trade_with_r("2", 1.0, "2024-01-04"),
        ];
        let cashflows = vec![Cashflow::new("1", CashflowType::Deposit, 800.0, at("2024-01-03"))];
        let ledger = compute_plan_ledger(
            &trades,
            &cashflows,
            Some(&AccountSettings::new(10_000.0, 1.0)),
        )
        .unwrap();

        let m = money_metrics(&trades[1..], &ledger, &OutcomeSource::Strategy);
        assert_eq!(m.start_equity, Some(11_000.0));
        assert!((m.total_pnl.unwrap() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn slice_order_ignores_input_order() {
        let trades = vec![
            trade_with_r("2", 1.0, "2024-01-03"),
            trade_with_r("1", 1.0, "2024-01-02"),
        ];
        let ledger = plan(&trades);
        let ids: Vec<&str> = ledger_slice(&trades, &ledger)
            .iter()
            .map(|(t, _)| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
