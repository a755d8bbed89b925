//! Application Layer
//!
//! The application layer orchestrates the computation modules through use
//! cases. It defines:
//!
//! - **Ports**: Interfaces for host-provided storage
//! - **Services**: Small stateful helpers built on ports
//! - **Use Cases**: Report assembly over a journal snapshot
//! - **DTOs**: Snapshot input and report output

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use services::*;
pub use use_cases::*;
