//! Deterministic walk-forward of the account balance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tracing::debug;

use super::event_log::{EventPayload, LedgerEvent, build_event_log};
use super::valuation::{BrokerValuation, PlanValuation, ValuationMode, ValuationPolicy};
use crate::domain::journal::{AccountSettings, Cashflow, Trade};
use crate::domain::shared::{DomainError, TradeId};

/// One replayed trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Balance before the trade, after any earlier cashflows.
    pub balance_before: f64,
    /// Amount risked, sized off `balance_before`.
    pub risk_amount: f64,
    /// Balance delta.
    pub pnl_money: f64,
    /// `balance_before + pnl_money`.
    pub balance_after: f64,
    /// Strategy R the trade was replayed with.
    pub r_multiple: f64,
    /// Broker ledger only: whether `pnl_money` is broker-reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_realized_covered: Option<bool>,
}

/// Replayed account ledger for one valuation mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Valuation that produced this ledger.
    pub mode: ValuationMode,
    /// Balance before the first event.
    pub starting_balance: f64,
    /// Balance after every event, cashflows included.
    pub ending_balance: f64,
    /// `balance_after` of the last trade.
    pub last_balance_after: Option<f64>,
    /// Whether any trade was replayed.
    pub has_closed_trades: bool,
    /// Risk percent as a fraction.
    pub risk_fraction: f64,
    /// Entry per replayed trade.
    pub by_trade: BTreeMap<TradeId, LedgerEntry>,
    /// Replayed trades in event order.
    pub ordered_trades: Vec<TradeId>,
}

impl Ledger {
    /// Entry for a trade, if it was replayed.
    #[must_use]
    pub fn entry(&self, id: &TradeId) -> Option<&LedgerEntry> {
        self.by_trade.get(id)
    }

    /// Entries in event order.
    pub fn entries(&self) -> impl Iterator<Item = (&TradeId, &LedgerEntry)> {
        self.ordered_trades
            .iter()
            .filter_map(|id| self.by_trade.get(id).map(|entry| (id, entry)))
    }

    /// Number of replayed trades.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered_trades.len()
    }

    /// Whether no trade was replayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered_trades.is_empty()
    }

    /// Check balance continuity against the events the ledger was built from.
    ///
    /// Every entry must satisfy `balance_after == balance_before + pnl_money`
    /// and start from the previous trade's `balance_after` plus any cashflows
    /// in between.
    ///
    /// # Errors
    ///
    /// Returns the first broken link as an invariant violation.
    pub fn verify_continuity(&self, events: &[LedgerEvent<'_>]) -> Result<(), DomainError> {
        let violation = |invariant: &str, state: String| DomainError::InvariantViolation {
            aggregate: "Ledger".to_string(),
            invariant: invariant.to_string(),
            state,
        };

        let mut balance = self.starting_balance;
        for event in events {
            match event.payload {
                EventPayload::Cashflow { amount, .. } => balance += amount,
                EventPayload::Trade { trade, .. } => {
                    let entry = self.entry(&trade.id).ok_or_else(|| {
                        violation("every replayed trade has an entry", format!("trade {}", trade.id))
                    })?;
                    if entry.balance_before != balance {
                        return Err(violation(
                            "balanceBefore follows the previous event",
                            format!("trade {}: {} != {balance}", trade.id, entry.balance_before),
                        ));
                    }
                    if entry.balance_after != entry.balance_before + entry.pnl_money {
                        return Err(violation(
                            "balanceAfter = balanceBefore + pnlMoney",
                            format!("trade {}", trade.id),
                        ));
                    }
                    balance = entry.balance_after;
                }
            }
        }

        if balance == self.ending_balance {
            Ok(())
        } else {
            Err(violation(
                "endingBalance follows the last event",
                format!("{} != {balance}", self.ending_balance),
            ))
        }
    }
}

/// Replay `events` from `settings` under `policy`.
///
/// Returns `None` when the settings cannot seed a ledger; callers treat that
/// as "statistics unavailable", never as zero.
#[must_use]
pub fn replay_ledger<P: ValuationPolicy + ?Sized>(
    events: &[LedgerEvent<'_>],
    settings: &AccountSettings,
    policy: &P,
) -> Option<Ledger> {
    let Some(risk_fraction) = settings.risk_fraction() else {
        debug!(mode = %policy.mode(), "invalid account settings, no ledger");
        return None;
    };

    let mut balance = settings.starting_balance;
    let mut by_trade = BTreeMap::new();
    let mut ordered_trades = Vec::new();
    let mut last_balance_after = None;

    for event in events {
        match event.payload {
            EventPayload::Cashflow { amount, .. } => balance += amount,
            EventPayload::Trade { trade, r } => {
                let balance_before = balance;
                let risk_amount = if balance_before > 0.0 {
                    balance_before * risk_fraction
                } else {
                    0.0
                };
                let resolved = policy.resolve_pnl(trade, r, risk_amount);
                let balance_after = balance_before + resolved.pnl_money;

                by_trade.insert(
                    trade.id.clone(),
                    LedgerEntry {
                        balance_before,
                        risk_amount,
                        pnl_money: resolved.pnl_money,
                        balance_after,
                        r_multiple: r,
                        is_realized_covered: resolved.is_realized_covered,
                    },
                );
                ordered_trades.push(trade.id.clone());
                last_balance_after = Some(balance_after);
                balance = balance_after;
            }
        }
    }

    debug!(
        mode = %policy.mode(),
        trades = ordered_trades.len(),
        ending_balance = balance,
        "replayed ledger"
    );

    Some(Ledger {
        mode: policy.mode(),
        starting_balance: settings.starting_balance,
        ending_balance: balance,
        last_balance_after,
        has_closed_trades: !ordered_trades.is_empty(),
        risk_fraction,
        by_trade,
        ordered_trades,
    })
}

/// Plan ledger: every trade is worth `R * riskAmount`.
#[must_use]
pub fn compute_plan_ledger(
    trades: &[Trade],
    cashflows: &[Cashflow],
    settings: Option<&AccountSettings>,
) -> Option<Ledger> {
    let settings = settings?;
    replay_ledger(&build_event_log(trades, cashflows), settings, &PlanValuation)
}

/// Broker ledger: reported net P&L where present, else the plan estimate.
#[must_use]
pub fn compute_broker_ledger(
    trades: &[Trade],
    cashflows: &[Cashflow],
    settings: Option<&AccountSettings>,
) -> Option<Ledger> {
    let settings = settings?;
    replay_ledger(&build_event_log(trades, cashflows), settings, &BrokerValuation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::{CashflowType, Direction};
    use crate::domain::shared::Timestamp;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    /// LONG 100 -> stop 90, so exit `100 + 10 * r` gives exactly `r`.
    fn trade_with_r(id: &str, r: f64, closed: &str) -> Trade {
        Trade::open(id, "EURUSD", Direction::Long, 100.0, at("2024-01-01"))
            .with_stop_loss(90.0)
            .closed(100.0 + 10.0 * r, at(closed))
    }

    fn settings() -> AccountSettings {
        AccountSettings::new(10_000.0, 1.0)
    }

    #[test]
    fn risk_compounds_off_current_balance() {
        let trades = vec![
            trade_with_r("1", 2.0, "2024-01-02"),
            trade_with_r("2", -1.0, "2024-01-03"),
        ];
        let ledger = compute_plan_ledger(&trades, &[], Some(&settings())).unwrap();

        let first = ledger.entry(&"1".into()).unwrap();
        assert!((first.risk_amount - 100.0).abs() < 1e-9);
        assert!((first.pnl_money - 200.0).abs() < 1e-9);
        assert!((first.balance_after - 10_200.0).abs() < 1e-9);

        let second = ledger.entry(&"2".into()).unwrap();
        assert!((second.risk_amount - 102.0).abs() < 1e-9);
        assert!((second.pnl_money + 102.0).abs() < 1e-9);
        assert!((second.balance_after - 10_098.0).abs() < 1e-9);

        assert_eq!(ledger.mode, ValuationMode::Plan);
        assert_eq!(ledger.last_balance_after, Some(ledger.ending_balance));
        assert!(ledger.has_closed_trades);
    }

    #[test]
    fn cashflows_move_balance_between_trades() {
        let trades = vec![
            trade_with_r("1", 1.0, "2024-01-02"),
            trade_with_r("2", 1.0, "2024-01-04"),
        ];
        let cashflows = vec![
            Cashflow::new("1", CashflowType::Deposit, 1_000.0, at("2024-01-03")),
            Cashflow::new("2", CashflowType::Withdrawal, 500.0, at("2024-01-05")),
        ];
        let ledger = compute_plan_ledger(&trades, &cashflows, Some(&settings())).unwrap();

        let second = ledger.entry(&"2".into()).unwrap();
        assert!((second.balance_before - 11_100.0).abs() < 1e-9);
        assert!((ledger.ending_balance - (second.balance_after - 500.0)).abs() < 1e-9);
        assert_eq!(ledger.last_balance_after, Some(second.balance_after));

        let events = build_event_log(&trades, &cashflows);
        assert!(ledger.verify_continuity(&events).is_ok());
    }

    #[test]
    fn broker_ledger_marks_coverage() {
        let trades = vec![
            trade_with_r("1", 2.0, "2024-01-02").with_net_pnl(150.0),
            trade_with_r("2", 1.0, "2024-01-03"),
        ];
        let plan = compute_plan_ledger(&trades, &[], Some(&settings())).unwrap();
        let broker = compute_broker_ledger(&trades, &[], Some(&settings())).unwrap();

        let covered = broker.entry(&"1".into()).unwrap();
        assert_eq!(covered.pnl_money, 150.0);
        assert_eq!(covered.is_realized_covered, Some(true));

        let estimated = broker.entry(&"2".into()).unwrap();
        assert_eq!(estimated.is_realized_covered, Some(false));
        assert!((estimated.risk_amount - 101.5).abs() < 1e-9);
        assert!((estimated.pnl_money - 101.5).abs() < 1e-9);

        assert!(plan.entry(&"1".into()).unwrap().is_realized_covered.is_none());
        assert_eq!(broker.mode, ValuationMode::Broker);
    }

    #[test]
    fn invalid_settings_give_no_ledger() {
        let trades = vec![trade_with_r("1", 1.0, "2024-01-02")];
        assert!(compute_plan_ledger(&trades, &[], None).is_none());
        assert!(compute_plan_ledger(&trades, &[], Some(&AccountSettings::new(0.0, 1.0))).is_none());
        assert!(
            compute_broker_ledger(&trades, &[], Some(&AccountSettings::new(1_000.0, f64::NAN)))
                .is_none()
        );
    }

    #[test]
    fn empty_journal_is_a_valid_ledger() {
        let ledger = compute_plan_ledger(&[], &[], Some(&settings())).unwrap();
        assert!(ledger.is_empty());
        assert!(!ledger.has_closed_trades);
        assert_eq!(ledger.last_balance_after, None);
        assert_eq!(ledger.ending_balance, 10_000.0);
        assert!((ledger.risk_fraction - 0.01).abs() < 1e-12);
    }

    #[test]
    fn wiped_out_balance_risks_nothing() {
        let trades = vec![trade_with_r("1", 1.0, "2024-01-03")];
        let cashflows = vec![Cashflow::new(
            "1",
            CashflowType::Withdrawal,
            20_000.0,
            at("2024-01-02"),
        )];
        let ledger = compute_plan_ledger(&trades, &cashflows, Some(&settings())).unwrap();
        let entry = ledger.entry(&"1".into()).unwrap();
        assert_eq!(entry.risk_amount, 0.0);
        assert_eq!(entry.pnl_money, 0.0);
    }

    #[test]
    fn continuity_check_catches_tampering() {
        let trades = vec![
            trade_with_r("1", 1.0, "2024-01-02"),
            trade_with_r("2", 1.0, "2024-01-03"),
        ];
        let events = build_event_log(&trades, &[]);
        let mut ledger = replay_ledger(&events, &settings(), &PlanValuation).unwrap();
        if let Some(entry) = ledger.by_trade.get_mut(&TradeId::from("2")) {
            entry.balance_before += 1.0;
        }
        assert!(matches!(
            ledger.verify_continuity(&events),
            Err(DomainError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn entries_follow_event_order() {
        let trades = vec![
            trade_with_r("b", 1.0, "2024-01-05"),
            trade_with_r("a", 1.0, "2024-01-02"),
        ];
        let ledger = compute_plan_ledger(&trades, &[], Some(&settings())).unwrap();
        let order: Vec<&str> = ledger.entries().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }
}
