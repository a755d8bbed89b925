//! Persistence Adapters
//!
//! Implementations of the storage ports.

pub mod in_memory;

pub use in_memory::InMemoryKeyValueStore;
