// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Ledger Engine - Trading Journal Core Library
//!
//! Deterministic account-balance replay and performance metrics for a
//! trading journal.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Records and value objects
//!   - `journal`: `Trade`, `Cashflow`, `AccountSettings`
//!   - `shared`: ids, timestamps, instruments, lenient field readers, errors
//!
//! - **Computation**: Pure functions over immutable snapshots
//!   - `ledger`: event log, R-multiples, Plan/Broker replay
//!   - `metrics`: summary statistics, money metrics, windows, equity curves
//!   - `risk`: position-size calculator
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `KeyValueStorePort`
//!   - `services`: `ContractSizeMemory`
//!   - `use_cases`: `ComputePerformance`
//!   - `dto`: `JournalSnapshot`, `PerformanceReport`
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: in-memory key-value store
//!
//! Every computation is a pure function of its inputs: re-running it on
//! the same snapshot gives the same result.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Records and value objects with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters.
pub mod infrastructure;

// =============================================================================
// Computation Modules
// =============================================================================

/// Event log, outcome calculation and ledger replay.
pub mod ledger;

/// Performance metrics over replayed ledgers.
pub mod metrics;

/// Position-size calculator.
pub mod risk;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration.
pub mod config;

/// Crate-level error type.
pub mod error;

/// Logging setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::journal::{AccountSettings, Cashflow, CashflowType, CloseReason, Direction, Trade};
pub use domain::shared::{CashflowId, DomainError, InstrumentSpec, Symbol, Timestamp, TradeId};

// Computation re-exports
pub use ledger::{
    BREAKEVEN_EPSILON, Ledger, LedgerEntry, OutcomeSource, ValuationMode, compute_broker_ledger,
    compute_plan_ledger, r_multiple,
};
pub use metrics::{DateWindow, MoneyMetrics, PeriodPreset, SummaryStats};
pub use risk::{PositionSizeCalculator, RiskCalcInput, RiskCalcResult, calculate_position_size};

// Application re-exports
pub use application::dto::{JournalSnapshot, PerformanceReport};
pub use application::ports::{KeyValueStorePort, StoreError};
pub use application::services::ContractSizeMemory;
pub use application::use_cases::ComputePerformanceUseCase;

// Infrastructure re-exports
pub use infrastructure::persistence::InMemoryKeyValueStore;

// Cross-cutting re-exports
pub use config::{ConfigError, EngineConfig, load_config};
pub use error::EngineError;
