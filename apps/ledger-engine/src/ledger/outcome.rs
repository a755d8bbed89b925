//! Per-trade outcomes: R-multiples, distance metrics and close reasons.

use serde::{Deserialize, Serialize};

use super::replay::Ledger;
use crate::domain::journal::{CloseReason, Direction, Trade};
use crate::domain::shared::InstrumentSpec;

/// Below this, an R-multiple or price difference counts as flat.
pub const BREAKEVEN_EPSILON: f64 = 1e-9;

/// Close-reason matching tolerance, in instrument ticks.
///
/// Separate from [`BREAKEVEN_EPSILON`]: that one decides whether a trade's
/// outcome is flat, this one decides which price level an exit hit.
pub const CLOSE_REASON_TOLERANCE_TICKS: f64 = 0.5;

/// Strategy R-multiple of a closed trade.
///
/// Returns `None` when the trade is open, has no usable exit, or has a stop
/// that contradicts its direction. An exit equal to the entry is exactly
/// `0.0` whether or not a stop was recorded.
#[must_use]
pub fn r_multiple(trade: &Trade) -> Option<f64> {
    if !trade.is_closed() {
        return None;
    }
    let entry = trade.entry_price;
    let exit = trade.exit_price?;
    if !entry.is_finite() || !exit.is_finite() {
        return None;
    }
    if (entry - exit).abs() < BREAKEVEN_EPSILON {
        return Some(0.0);
    }

    let stop = trade.stop_loss_price.filter(|s| s.is_finite())?;
    let (risk, reward) = match trade.direction {
        Direction::Long => (entry - stop, exit - entry),
        Direction::Short => (stop - entry, entry - exit),
    };
    if risk <= 0.0 {
        return None;
    }
    Some(reward / risk)
}

/// R-multiple backed by broker money when the Broker ledger allows it.
///
/// Uses `netPnlMoney / riskAmount` when the trade carries a finite net P&L
/// and `broker_ledger` recorded a non-zero risk amount for it; otherwise
/// falls back to [`r_multiple`].
#[must_use]
pub fn realized_r(trade: &Trade, broker_ledger: &Ledger) -> Option<f64> {
    let realized = trade.finite_net_pnl().and_then(|net| {
        broker_ledger
            .entry(&trade.id)
            .map(|entry| entry.risk_amount)
            .filter(|risk| risk.is_finite() && *risk != 0.0)
            .map(|risk| net / risk)
    });
    realized.or_else(|| r_multiple(trade))
}

/// Price distances of a trade expressed in instrument ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeDistances {
    /// Entry to stop-loss.
    pub sl_pips: Option<f64>,
    /// Entry to take-profit.
    pub tp_pips: Option<f64>,
    /// `tp_pips / sl_pips`.
    pub rr_ratio: Option<f64>,
}

/// Stop and target distances for display.
#[must_use]
pub fn trade_distances(trade: &Trade) -> TradeDistances {
    let tick = InstrumentSpec::resolve(&trade.symbol).tick_size;
    let entry = Some(trade.entry_price).filter(|e| e.is_finite());
    let ticks_to = |price: Option<f64>| {
        let entry = entry?;
        let price = price.filter(|p| p.is_finite())?;
        Some((entry - price).abs() / tick)
    };

    let sl_pips = ticks_to(trade.stop_loss_price);
    let tp_pips = ticks_to(trade.take_profit_price);
    let rr_ratio = match (sl_pips, tp_pips) {
        (Some(sl), Some(tp)) if sl > 0.0 => Some(tp / sl),
        _ => None,
    };

    TradeDistances {
        sl_pips,
        tp_pips,
        rr_ratio,
    }
}

/// Why a trade closed.
///
/// The trader's override wins. Otherwise the exit price is matched against
/// take-profit, stop-loss and entry (in that order) within half a tick;
/// an exit matching none of them is `Manual`. Open trades have no reason.
#[must_use]
pub fn classify_close_reason(trade: &Trade) -> Option<CloseReason> {
    if let Some(reason) = trade.close_reason_override {
        return Some(reason);
    }
    if !trade.is_closed() {
        return None;
    }
    let exit = trade.exit_price.filter(|e| e.is_finite())?;

    let tolerance = InstrumentSpec::resolve(&trade.symbol).tick_size * CLOSE_REASON_TOLERANCE_TICKS;
    let hits = |level: Option<f64>| {
        level
            .filter(|l| l.is_finite())
            .is_some_and(|l| (exit - l).abs() <= tolerance)
    };

    let reason = if hits(trade.take_profit_price) {
        CloseReason::TakeProfit
    } else if hits(trade.stop_loss_price) {
        CloseReason::StopLoss
    } else if hits(Some(trade.entry_price)) {
        CloseReason::BreakEven
    } else {
        CloseReason::Manual
    };
    Some(reason)
}
