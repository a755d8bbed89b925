//! Shared Domain Types
//!
//! Value objects, lenient field readers and errors shared by every module.

pub mod errors;
pub mod lenient;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{CashflowId, InstrumentClass, InstrumentSpec, Symbol, Timestamp, TradeId};
