//! Journal records: trades, cashflows and account settings.
//!
//! These are the leaves of every computation pass. They arrive as loosely
//! shaped JSON; optional fields that are missing, null or unparseable read
//! back as `None` so a bad field excludes a record from aggregates instead
//! of failing the whole pass.

pub mod cashflow;
pub mod settings;
pub mod trade;

pub use cashflow::{Cashflow, CashflowType};
pub use settings::AccountSettings;
pub use trade::{CloseReason, Direction, Trade};
