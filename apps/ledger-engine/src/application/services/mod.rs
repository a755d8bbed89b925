//! Application Services
//!
//! Services coordinate domain logic with injected ports.

mod contract_size_memory;

pub use contract_size_memory::{ContractSizeMemory, METAL_CONTRACT_SIZE_KEY};
