//! Merge trades and cashflows into one chronological event stream.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::domain::journal::{Cashflow, Trade};
use crate::domain::shared::{CashflowId, TradeId};

use super::outcome::r_multiple;

/// Event kind. Declaration order is the tie-break priority at equal
/// timestamps: a same-instant deposit must be in the balance before the
/// trade is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// External account movement.
    Cashflow,
    /// Closed trade.
    Trade,
}

/// What an event applies to the balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventPayload<'a> {
    /// Signed cashflow delta.
    Cashflow {
        /// Source record.
        cashflow: &'a Cashflow,
        /// Signed balance delta.
        amount: f64,
    },
    /// Closed trade with its strategy R.
    Trade {
        /// Source record.
        trade: &'a Trade,
        /// Strategy R-multiple.
        r: f64,
    },
}

/// One replayable event. Rebuilt on every pass and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEvent<'a> {
    /// Epoch milliseconds.
    pub timestamp_ms: i64,
    /// Payload.
    pub payload: EventPayload<'a>,
}

impl LedgerEvent<'_> {
    /// Event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::Cashflow { .. } => EventKind::Cashflow,
            EventPayload::Trade { .. } => EventKind::Trade,
        }
    }

    /// Trade id, for trade events.
    #[must_use]
    pub const fn trade_id(&self) -> Option<&TradeId> {
        match &self.payload {
            EventPayload::Trade { trade, .. } => Some(&trade.id),
            EventPayload::Cashflow { .. } => None,
        }
    }

    /// Cashflow id, for cashflow events.
    #[must_use]
    pub const fn cashflow_id(&self) -> Option<&CashflowId> {
        match &self.payload {
            EventPayload::Cashflow { cashflow, .. } => Some(&cashflow.id),
            EventPayload::Trade { .. } => None,
        }
    }

    /// Total order: timestamp, then cashflow before trade, then ascending id.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.timestamp_ms
            .cmp(&other.timestamp_ms)
            .then_with(|| self.kind().cmp(&other.kind()))
            .then_with(|| match (&self.payload, &other.payload) {
                (EventPayload::Trade { trade: a, .. }, EventPayload::Trade { trade: b, .. }) => {
                    a.id.cmp(&b.id)
                }
                (
                    EventPayload::Cashflow { cashflow: a, .. },
                    EventPayload::Cashflow { cashflow: b, .. },
                ) => a.id.cmp(&b.id),
                _ => Ordering::Equal,
            })
    }
}

/// Counts from one build, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventLogStats {
    /// Cashflows without a time or a finite amount.
    pub skipped_cashflows: usize,
    /// Open trades.
    pub open_trades: usize,
    /// Closed trades without a defined R.
    pub unresolved_trades: usize,
}

/// Build the sorted event log.
///
/// Cashflows need an `occurredAt` and a finite amount. Trades need a
/// `closedAt` and a defined R; the rest are left out of the ledger but
/// remain in the raw collections.
#[must_use]
pub fn build_event_log<'a>(trades: &'a [Trade], cashflows: &'a [Cashflow]) -> Vec<LedgerEvent<'a>> {
    build_event_log_with_stats(trades, cashflows).0
}

/// [`build_event_log`] plus counts of what was left out.
#[must_use]
pub fn build_event_log_with_stats<'a>(
    trades: &'a [Trade],
    cashflows: &'a [Cashflow],
) -> (Vec<LedgerEvent<'a>>, EventLogStats) {
    let mut stats = EventLogStats::default();
    let mut events = Vec::with_capacity(trades.len() + cashflows.len());

    for cashflow in cashflows {
        match (cashflow.occurred_at, cashflow.signed_amount()) {
            (Some(at), Some(amount)) => events.push(LedgerEvent {
                timestamp_ms: at.unix_millis(),
                payload: EventPayload::Cashflow { cashflow, amount },
            }),
            _ => stats.skipped_cashflows += 1,
        }
    }

    for trade in trades {
        let Some(closed_at) = trade.closed_at else {
            stats.open_trades += 1;
            continue;
        };
        match r_multiple(trade) {
            Some(r) => events.push(LedgerEvent {
                timestamp_ms: closed_at.unix_millis(),
                payload: EventPayload::Trade { trade, r },
            }),
            None => {
                trace!(trade_id = %trade.id, "closed trade has no defined R, excluded");
                stats.unresolved_trades += 1;
            }
        }
    }

    events.sort_by(LedgerEvent::chronological_cmp);

    debug!(
        events = events.len(),
        skipped_cashflows = stats.skipped_cashflows,
        open_trades = stats.open_trades,
        unresolved_trades = stats.unresolved_trades,
        "built event log"
    );
    (events, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::{CashflowType, Direction};
    use crate::domain::shared::Timestamp;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn winner(id: &str, closed: &str) -> Trade {
        Trade::open(id, "EURUSD", Direction::Long, 100.0, at("2024-01-01"))
            .with_stop_loss(90.0)
            .closed(120.0, at(closed))
    }

    fn ids(events: &[LedgerEvent<'_>]) -> Vec<String> {
        events
            .iter()
            .map(|e| match e.payload {
                EventPayload::Trade { trade, .. } => format!("t{}", trade.id),
                EventPayload::Cashflow { cashflow, .. } => format!("c{}", cashflow.id),
            })
            .collect()
    }

    #[test]
    fn same_instant_cashflow_precedes_trade() {
        let trades = vec![winner("1", "2024-01-05T10:00:00Z")];
        let cashflows = vec![Cashflow::new(
            "9",
            CashflowType::Deposit,
            500.0,
            at("2024-01-05T10:00:00Z"),
        )];
        let events = build_event_log(&trades, &cashflows);
        assert_eq!(ids(&events), vec!["c9", "t1"]);
    }

    #[test]
    fn same_kind_ties_break_by_numeric_id() {
        let when = "2024-01-05T10:00:00Z";
        let trades = vec![winner("10", when), winner("9", when), winner("2", when)];
        let events = build_event_log(&trades, &[]);
        assert_eq!(ids(&events), vec!["t2", "t9", "t10"]);
    }

    #[test]
    fn orders_by_time_first() {
        let trades = vec![
            winner("1", "2024-01-07T00:00:00Z"),
            winner("2", "2024-01-03T00:00:00Z"),
        ];
        let cashflows = vec![Cashflow::new(
            "1",
            CashflowType::Withdrawal,
            50.0,
            at("2024-01-05T00:00:00Z"),
        )];
        let events = build_event_log(&trades, &cashflows);
        assert_eq!(ids(&events), vec!["t2", "c1", "t1"]);
        assert_eq!(
            events[1].payload,
            EventPayload::Cashflow {
                cashflow: &cashflows[0],
                amount: -50.0
            }
        );
    }

    #[test]
    fn unusable_records_are_counted_not_included() {
        let open = Trade::open("1", "EURUSD", Direction::Long, 100.0, at("2024-01-01"));
        let bad_stop = Trade::open("2", "EURUSD", Direction::Long, 100.0, at("2024-01-01"))
            .with_stop_loss(110.0)
            .closed(120.0, at("2024-01-02"));
        let mut undated = Cashflow::new("1", CashflowType::Deposit, 10.0, at("2024-01-01"));
        undated.occurred_at = None;
        let mut nan = Cashflow::new("2", CashflowType::Deposit, f64::NAN, at("2024-01-01"));
        nan.note = Some("bad".into());

        let trades = vec![open, bad_stop, winner("3", "2024-01-03")];
        let cashflows = vec![undated, nan];
        let (events, stats) = build_event_log_with_stats(&trades, &cashflows);

        assert_eq!(ids(&events), vec!["t3"]);
        assert_eq!(
            stats,
            EventLogStats {
                skipped_cashflows: 2,
                open_trades: 1,
                unresolved_trades: 1,
            }
        );
    }

    #[test]
    fn repeated_builds_are_identical() {
        let when = "2024-02-01T00:00:00Z";
        let trades = vec![winner("b", when), winner("a", when), winner("3", when)];
        let cashflows = vec![
            Cashflow::new("2", CashflowType::Deposit, 1.0, at(when)),
            Cashflow::new("1", CashflowType::Deposit, 1.0, at(when)),
        ];
        let first = ids(&build_event_log(&trades, &cashflows));
        let second = ids(&build_event_log(&trades, &cashflows));
        assert_eq!(first, second);
        assert_eq!(first, vec!["c1", "c2", "t3", "ta", "tb"]);
    }
}
