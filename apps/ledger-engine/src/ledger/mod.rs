//! Ledger engine: event ordering, trade outcomes and balance replay.
//!
//! Trades and cashflows are merged into one chronological event log, then
//! replayed from the account settings under a [`ValuationPolicy`]. Plan and
//! Broker ledgers are two independent pure calls over the same log.
//!
//! # Example
//!
//! ```
//! use ledger_engine::domain::journal::{AccountSettings, Direction, Trade};
//! use ledger_engine::domain::shared::Timestamp;
//! use ledger_engine::ledger::compute_plan_ledger;
//!
//! let opened = Timestamp::parse("2024-03-01T09:00:00Z").unwrap();
//! let closed = Timestamp::parse("2024-03-01T15:00:00Z").unwrap();
//! let trades = vec![
//!     Trade::open("1", "EURUSD", Direction::Long, 100.0, opened)
//!         .with_stop_loss(90.0)
//!         .closed(120.0, closed),
//! ];
//! let settings = AccountSettings::new(10_000.0, 1.0);
//!
//! let ledger = compute_plan_ledger(&trades, &[], Some(&settings)).unwrap();
//! assert!((ledger.ending_balance - 10_200.0).abs() < 1e-9);
//! ```

pub mod event_log;
pub mod outcome;
pub mod replay;
pub mod valuation;

pub use event_log::{
    EventKind, EventLogStats, EventPayload, LedgerEvent, build_event_log,
    build_event_log_with_stats,
};
pub use outcome::{
    BREAKEVEN_EPSILON, CLOSE_REASON_TOLERANCE_TICKS, TradeDistances, classify_close_reason,
    r_multiple, realized_r, trade_distances,
};
pub use replay::{Ledger, LedgerEntry, compute_broker_ledger, compute_plan_ledger, replay_ledger};
pub use valuation::{
    BrokerValuation, OutcomeSource, PlanValuation, ResolvedPnl, ValuationMode, ValuationPolicy,
};
