//! Valuation policies: how a trade's money P&L is resolved during replay.
//!
//! The two ledgers share one walk-forward algorithm and differ only in the
//! policy passed to it, so neither can leak state into the other.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::{r_multiple, realized_r};
use super::replay::Ledger;
use crate::domain::journal::Trade;

/// Which valuation built a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationMode {
    /// Every trade is worth `R * riskAmount`.
    #[default]
    Plan,
    /// Broker net P&L where reported, otherwise the plan estimate.
    Broker,
}

impl fmt::Display for ValuationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plan => write!(f, "plan"),
            Self::Broker => write!(f, "broker"),
        }
    }
}

/// Money outcome of one trade under a policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPnl {
    /// Balance delta.
    pub pnl_money: f64,
    /// Whether broker money backs the figure. `None` when the policy does
    /// not distinguish.
    pub is_realized_covered: Option<bool>,
}

/// Resolves the P&L of a replayed trade.
pub trait ValuationPolicy {
    /// Mode recorded on the resulting ledger.
    fn mode(&self) -> ValuationMode;

    /// P&L for `trade` given its strategy `r` and the `risk_amount` sized
    /// off the balance at that point.
    fn resolve_pnl(&self, trade: &Trade, r: f64, risk_amount: f64) -> ResolvedPnl;
}

/// Plan valuation: `R * riskAmount`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanValuation;

impl ValuationPolicy for PlanValuation {
    fn mode(&self) -> ValuationMode {
        ValuationMode::Plan
    }

    fn resolve_pnl(&self, _trade: &Trade, r: f64, risk_amount: f64) -> ResolvedPnl {
        ResolvedPnl {
            pnl_money: r * risk_amount,
            is_realized_covered: None,
        }
    }
}

/// Broker valuation: reported net P&L, else the plan estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokerValuation;

impl ValuationPolicy for BrokerValuation {
    fn mode(&self) -> ValuationMode {
        ValuationMode::Broker
    }

    fn resolve_pnl(&self, trade: &Trade, r: f64, risk_amount: f64) -> ResolvedPnl {
        match trade.finite_net_pnl() {
            Some(net) => ResolvedPnl {
                pnl_money: net,
                is_realized_covered: Some(true),
            },
            None => ResolvedPnl {
                pnl_money: r * risk_amount,
                is_realized_covered: Some(false),
            },
        }
    }
}

/// Where statistics read a trade's R from.
#[derive(Debug, Clone, Copy)]
pub enum OutcomeSource<'a> {
    /// Strategy R from prices.
    Strategy,
    /// Realized R against the given Broker ledger.
    Realized(&'a Ledger),
}

impl<'a> OutcomeSource<'a> {
    /// Source matching `mode`. Broker mode without a ledger falls back to
    /// strategy R.
    #[must_use]
    pub fn for_mode(mode: ValuationMode, broker_ledger: Option<&'a Ledger>) -> Self {
        match (mode, broker_ledger) {
            (ValuationMode::Broker, Some(ledger)) => Self::Realized(ledger),
            _ => Self::Strategy,
        }
    }

    /// R for `trade`, or `None` when it cannot be resolved.
    #[must_use]
    pub fn resolve(&self, trade: &Trade) -> Option<f64> {
        match self {
            Self::Strategy => r_multiple(trade),
            Self::Realized(ledger) => realized_r(trade, ledger),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::Direction;
    use crate::domain::shared::Timestamp;

    fn trade() -> Trade {
        Trade::open("1", "EURUSD", Direction::Long, 100.0, Timestamp::parse("2024-01-01").unwrap())
    }

    #[test]
    fn plan_is_r_times_risk() {
        let resolved = PlanValuation.resolve_pnl(&trade().with_net_pnl(999.0), 2.0, 100.0);
        assert_eq!(resolved.pnl_money, 200.0);
        assert_eq!(resolved.is_realized_covered, None);
    }

    #[test]
    fn broker_prefers_net_pnl() {
        let resolved = BrokerValuation.resolve_pnl(&trade().with_net_pnl(180.0), 2.0, 100.0);
        assert_eq!(resolved.pnl_money, 180.0);
        assert_eq!(resolved.is_realized_covered, Some(true));
    }

    #[test]
    fn broker_falls_back_to_plan_estimate() {
        let resolved = BrokerValuation.resolve_pnl(&trade(), -1.0, 102.0);
        assert_eq!(resolved.pnl_money, -102.0);
        assert_eq!(resolved.is_realized_covered, Some(false));
    }

    #[test]
    fn modes_render_lowercase() {
        assert_eq!(PlanValuation.mode().to_string(), "plan");
        assert_eq!(
            serde_json::to_string(&BrokerValuation.mode()).unwrap(),
            "\"broker\""
        );
    }

    #[test]
    fn broker_source_needs_a_ledger() {
        assert!(matches!(
            OutcomeSource::for_mode(ValuationMode::Broker, None),
            OutcomeSource::Strategy
        ));
    }
}
