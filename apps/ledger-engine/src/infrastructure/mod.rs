//! Infrastructure Layer
//!
//! Adapters implementing the application ports.
//!
//! - `persistence`: key-value store adapters

pub mod persistence;

pub use persistence::InMemoryKeyValueStore;
