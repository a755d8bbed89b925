//! Shared Value Objects
//!
//! Immutable domain types used across the engine.
//! Value objects are compared by value, not identity.

mod identifiers;
mod instrument;
mod symbol;
mod timestamp;

pub use identifiers::{CashflowId, TradeId};
pub use instrument::{
    DEFAULT_TICK_SIZE, FX_UNITS_PER_LOT, InstrumentClass, InstrumentSpec, JPY_TICK_SIZE,
    METAL_TICK_SIZE, METAL_UNITS_PER_LOT,
};
pub use symbol::Symbol;
pub use timestamp::Timestamp;
pub(crate) use timestamp::RawTimestamp;
