//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod compute_performance;

pub use compute_performance::ComputePerformanceUseCase;
