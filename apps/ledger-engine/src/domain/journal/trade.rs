//! Journaled trade record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::lenient;
use crate::domain::shared::{Symbol, Timestamp, TradeId};

/// Trade direction as stated by the trader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Profits when price rises.
    #[serde(alias = "long", alias = "Long")]
    Long,
    /// Profits when price falls.
    #[serde(alias = "short", alias = "Short")]
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

/// Why a trade was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseReason {
    /// Take-profit level reached.
    #[serde(rename = "TP")]
    TakeProfit,
    /// Stop-loss level reached.
    #[serde(rename = "SL")]
    StopLoss,
    /// Closed at (or around) the entry price.
    BreakEven,
    /// Closed by hand somewhere else.
    Manual,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TakeProfit => write!(f, "TP"),
            Self::StopLoss => write!(f, "SL"),
            Self::BreakEven => write!(f, "BreakEven"),
            Self::Manual => write!(f, "Manual"),
        }
    }
}

/// A journaled position.
///
/// Created open (no `closed_at`) and closed once; re-opening is not
/// modelled. Broker-reported money fields are optional and a present
/// `net_pnl_money` marks the trade as realized-covered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Unique id, also the final ordering tie-break.
    pub id: TradeId,
    /// Instrument code.
    pub symbol: Symbol,
    /// Stated direction.
    pub direction: Direction,
    /// Entry price.
    pub entry_price: f64,
    /// When the trade was journaled.
    pub created_at: Timestamp,

    /// Exit price, once closed.
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_price: Option<f64>,
    /// Close time; `None` while open.
    #[serde(
        default,
        deserialize_with = "lenient::option_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<Timestamp>,
    /// Stop-loss price.
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_loss_price: Option<f64>,
    /// Take-profit price.
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub take_profit_price: Option<f64>,
    /// Close reason chosen by the trader; wins over classification.
    #[serde(
        default,
        deserialize_with = "lenient::option_of",
        skip_serializing_if = "Option::is_none"
    )]
    pub close_reason_override: Option<CloseReason>,
    /// Short manual-close reason.
    #[serde(
        default,
        deserialize_with = "lenient::option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_reason: Option<String>,
    /// Free-form manual-close description.
    #[serde(
        default,
        deserialize_with = "lenient::option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_description: Option<String>,

    /// Broker-reported net P&L in account currency.
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub net_pnl_money: Option<f64>,
    /// Broker-reported commission.
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub commission_money: Option<f64>,
    /// Broker-reported swap.
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub swap_money: Option<f64>,

    /// Post-trade confidence score (1-10).
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_confidence: Option<f64>,
}

impl Trade {
    /// Create an open trade with no optional fields set.
    #[must_use]
    pub fn open(
        id: impl Into<TradeId>,
        symbol: impl Into<Symbol>,
        direction: Direction,
        entry_price: f64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            direction,
            entry_price,
            created_at,
            exit_price: None,
            closed_at: None,
            stop_loss_price: None,
            take_profit_price: None,
            close_reason_override: None,
            manual_reason: None,
            manual_description: None,
            net_pnl_money: None,
            commission_money: None,
            swap_money: None,
            post_confidence: None,
        }
    }

    /// Close at `exit_price` at time `closed_at`.
    #[must_use]
    pub const fn closed(mut self, exit_price: f64, closed_at: Timestamp) -> Self {
        self.exit_price = Some(exit_price);
        self.closed_at = Some(closed_at);
        self
    }

    /// Set the stop-loss price.
    #[must_use]
    pub const fn with_stop_loss(mut self, price: f64) -> Self {
        self.stop_loss_price = Some(price);
        self
    }

    /// Set the take-profit price.
    #[must_use]
    pub const fn with_take_profit(mut self, price: f64) -> Self {
        self.take_profit_price = Some(price);
        self
    }

    /// Set the broker-reported net P&L.
    #[must_use]
    pub const fn with_net_pnl(mut self, net_pnl: f64) -> Self {
        self.net_pnl_money = Some(net_pnl);
        self
    }

    /// Set the post-trade confidence score.
    #[must_use]
    pub const fn with_confidence(mut self, score: f64) -> Self {
        self.post_confidence = Some(score);
        self
    }

    /// Set the close-reason override.
    #[must_use]
    pub const fn with_close_reason(mut self, reason: CloseReason) -> Self {
        self.close_reason_override = Some(reason);
        self
    }

    /// Whether the trade has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Whether a finite broker net P&L is present.
    #[must_use]
    pub fn is_net_pnl_present(&self) -> bool {
        self.finite_net_pnl().is_some()
    }

    /// Broker net P&L when finite.
    #[must_use]
    pub fn finite_net_pnl(&self) -> Option<f64> {
        self.net_pnl_money.filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_closed_trade() {
        let json = r#"{
            "id": 12,
            "symbol": "eurusd",
            "direction": "LONG",
            "entryPrice": 1.1,
            "createdAt": "2024-01-01T09:00:00Z",
            "exitPrice": "1.12",
            "closedAt": "2024-01-01T15:00:00Z",
            "stopLossPrice": 1.09,
            "takeProfitPrice": null,
            "closeReasonOverride": "TP",
            "netPnlMoney": 150.5,
            "postConfidence": 7
        }"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.id.as_str(), "12");
        assert_eq!(trade.symbol.as_str(), "EURUSD");
        assert_eq!(trade.exit_price, Some(1.12));
        assert_eq!(trade.take_profit_price, None);
        assert_eq!(trade.close_reason_override, Some(CloseReason::TakeProfit));
        assert!(trade.is_closed());
        assert!(trade.is_net_pnl_present());
        assert_eq!(trade.post_confidence, Some(7.0));
    }

    #[test]
    fn unknown_close_reason_reads_as_absent() {
        let json = r#"{"id":"a","symbol":"XAUUSD","direction":"short","entryPrice":2000,
            "createdAt":"2024-01-01","closeReasonOverride":"Panic"}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.direction, Direction::Short);
        assert_eq!(trade.close_reason_override, None);
        assert!(!trade.is_closed());
    }

    #[test]
    fn unparseable_close_time_keeps_trade_open() {
        let json = r#"{"id":"a","symbol":"EURUSD","direction":"LONG","entryPrice":1.1,
            "createdAt":"2024-01-01","exitPrice":1.2,"closedAt":"later"}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert!(!trade.is_closed());
        assert_eq!(trade.exit_price, Some(1.2));
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let json = r#"{"id":"a","symbol":"EURUSD","entryPrice":1.1,"createdAt":"2024-01-01"}"#;
        assert!(serde_json::from_str::<Trade>(json).is_err());
    }

    #[test]
    fn non_finite_net_pnl_is_not_present() {
        let at = Timestamp::parse("2024-01-01").unwrap();
        let trade = Trade::open("1", "EURUSD", Direction::Long, 1.1, at).with_net_pnl(f64::NAN);
        assert!(!trade.is_net_pnl_present());
    }

    #[test]
    fn close_reason_wire_spellings() {
        assert_eq!(serde_json::to_string(&CloseReason::StopLoss).unwrap(), "\"SL\"");
        assert_eq!(
            serde_json::to_string(&CloseReason::BreakEven).unwrap(),
            "\"BreakEven\""
        );
        assert_eq!(CloseReason::TakeProfit.to_string(), "TP");
    }
}
