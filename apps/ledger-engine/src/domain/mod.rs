//! Domain Layer
//!
//! Journal records and the value objects they are built from. Nothing in
//! this layer performs I/O.
//!
//! - [`journal`]: trades, cashflows and account settings
//! - [`shared`]: identifiers, timestamps, symbols, instrument metadata

pub mod journal;
pub mod shared;
