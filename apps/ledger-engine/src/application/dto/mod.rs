//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod journal_snapshot;
mod performance_report;

pub use journal_snapshot::JournalSnapshot;
pub use performance_report::PerformanceReport;
