//! External account movements.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::lenient;
use crate::domain::shared::{CashflowId, Timestamp};

/// Direction of an account movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashflowType {
    /// Money added to the account.
    Deposit,
    /// Money taken out of the account.
    Withdrawal,
}

impl CashflowType {
    /// `+1.0` for deposits, `-1.0` for withdrawals.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Deposit => 1.0,
            Self::Withdrawal => -1.0,
        }
    }
}

impl fmt::Display for CashflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "DEPOSIT"),
            Self::Withdrawal => write!(f, "WITHDRAWAL"),
        }
    }
}

/// A deposit or withdrawal.
///
/// `amount_money` is stored unsigned; the sign comes from `cashflow_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashflow {
    /// Unique id.
    pub id: CashflowId,
    /// Deposit or withdrawal.
    #[serde(rename = "type")]
    pub cashflow_type: CashflowType,
    /// Unsigned amount in account currency.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub amount_money: Option<f64>,
    /// When the movement happened.
    #[serde(default, deserialize_with = "lenient::option_timestamp")]
    pub occurred_at: Option<Timestamp>,
    /// Free-form note.
    #[serde(
        default,
        deserialize_with = "lenient::option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

impl Cashflow {
    /// Create a cashflow.
    #[must_use]
    pub fn new(
        id: impl Into<CashflowId>,
        cashflow_type: CashflowType,
        amount_money: f64,
        occurred_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            cashflow_type,
            amount_money: Some(amount_money),
            occurred_at: Some(occurred_at),
            note: None,
        }
    }

    /// Signed balance delta, or `None` when the amount is missing or not finite.
    #[must_use]
    pub fn signed_amount(&self) -> Option<f64> {
        self.amount_money
            .filter(|a| a.is_finite())
            .map(|a| self.cashflow_type.sign() * a.abs())
    }
}
