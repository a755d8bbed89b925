//! Application Ports (Driven)
//!
//! Interfaces the engine calls on its host. The computation core needs none
//! of them; they back convenience services such as remembered calculator
//! settings.

mod key_value_store_port;

pub use key_value_store_port::{KeyValueStorePort, StoreError};
