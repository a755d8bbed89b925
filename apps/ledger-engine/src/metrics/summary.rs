//! Win/loss counts, R averages and confidence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::journal::Trade;
use crate::ledger::{BREAKEVEN_EPSILON, OutcomeSource, r_multiple};

/// Aggregate outcome statistics over a set of trades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Trades considered.
    pub trade_count: usize,
    /// Trades whose R could not be resolved.
    pub excluded: usize,
    /// Trades with a resolved R.
    pub numeric_count: usize,
    /// Sum of resolved R.
    pub sum: f64,
    /// `sum / numeric_count`.
    pub average: Option<f64>,
    /// `win_count / numeric_count * 100`.
    pub win_pct: Option<f64>,
    /// Trades with a confidence score.
    pub conf_count: usize,
    /// Mean confidence score.
    pub conf_average: Option<f64>,
    /// `R > epsilon`.
    pub win_count: usize,
    /// `R < -epsilon`.
    pub loss_count: usize,
    /// `|R| <= epsilon`.
    pub breakeven_count: usize,
}

/// Outcome statistics with R read from `source`.
///
/// Confidence is averaged over every trade carrying a finite score, whether
/// or not its R resolves.
#[must_use]
pub fn summary_stats(trades: &[Trade], source: &OutcomeSource<'_>) -> SummaryStats {
    let mut stats = SummaryStats {
        trade_count: trades.len(),
        ..SummaryStats::default()
    };
    let mut conf_sum = 0.0;

    for trade in trades {
        if let Some(score) = trade.post_confidence.filter(|c| c.is_finite()) {
            stats.conf_count += 1;
            conf_sum += score;
        }

        let Some(r) = source.resolve(trade).filter(|r| r.is_finite()) else {
            stats.excluded += 1;
            continue;
        };
        stats.numeric_count += 1;
        stats.sum += r;
        if r > BREAKEVEN_EPSILON {
            stats.win_count += 1;
        } else if r < -BREAKEVEN_EPSILON {
            stats.loss_count += 1;
        } else {
            stats.breakeven_count += 1;
        }
    }

    if stats.numeric_count > 0 {
        let n = stats.numeric_count as f64;
        stats.average = Some(stats.sum / n);
        stats.win_pct = Some(stats.win_count as f64 / n * 100.0);
    }
    if stats.conf_count > 0 {
        stats.conf_average = Some(conf_sum / stats.conf_count as f64);
    }
    stats
}

/// How much of the Broker view is backed by broker money.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedCoverage {
    /// Closed trades with a defined strategy R.
    pub eligible: usize,
    /// Of those, trades with broker-reported net P&L.
    pub covered: usize,
}

/// Label for Broker-mode figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageLabel {
    /// Every eligible trade is broker-backed.
    Actual,
    /// Some are.
    Mixed,
    /// None are.
    Estimated,
}

impl fmt::Display for CoverageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actual => write!(f, "actual"),
            Self::Mixed => write!(f, "mixed"),
            Self::Estimated => write!(f, "estimated"),
        }
    }
}

impl RealizedCoverage {
    /// Label for the figures this coverage backs.
    #[must_use]
    pub const fn label(&self) -> CoverageLabel {
        if self.eligible > 0 && self.covered == self.eligible {
            CoverageLabel::Actual
        } else if self.covered > 0 {
            CoverageLabel::Mixed
        } else {
            CoverageLabel::Estimated
        }
    }

    /// Covered share in percent.
    #[must_use]
    pub fn covered_pct(&self) -> Option<f64> {
        (self.eligible > 0).then(|| self.covered as f64 / self.eligible as f64 * 100.0)
    }
}

/// Count broker-backed trades among those with a defined strategy R.
#[must_use]
pub fn realized_coverage(trades: &[Trade]) -> RealizedCoverage {
    trades
        .iter()
        .filter(|t| t.is_closed() && r_multiple(t).is_some())
        .fold(RealizedCoverage::default(), |mut acc, trade| {
            acc.eligible += 1;
            if trade.is_net_pnl_present() {
                acc.covered += 1;
            }
            acc
        })
}
