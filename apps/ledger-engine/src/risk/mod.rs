//! Risk position-size calculator.
//!
//! Sizes a position so that hitting the stop loses a fixed percent of the
//! account, converting tick value into the account currency when needed.
//! Independent of the ledger.
//!
//! # Example
//!
//! ```
//! use ledger_engine::risk::{RiskCalcInput, calculate_position_size};
//!
//! let input = RiskCalcInput::new("EURUSD", 10_000.0, 1.0).with_prices(1.1050, 1.1000);
//! let result = calculate_position_size(&input);
//!
//! assert!(result.is_valid);
//! assert!((result.lots.unwrap() - 0.2).abs() < 1e-9);
//! ```

mod calculator;
mod types;

pub use calculator::{PositionSizeCalculator, calculate_position_size};
pub use types::{DEFAULT_ACCOUNT_CURRENCY, RiskCalcInput, RiskCalcResult, RiskInputField};
