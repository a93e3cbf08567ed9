//! # auramon-core - Core Domain Types
//!
//! Foundation crate for auramon. Provides the domain types shared by the
//! sync client and the TUI, the error taxonomy, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`MachineSnapshot`] - The latest committed state of one machine
//! - [`AlertRecord`] - A single fleet alert, newest-first from the server
//! - [`MachineDetail`] - Detail payload for one machine (history, logs)
//! - [`MaintenanceLogEntry`] / [`MaintenanceRequest`] - Maintenance records
//! - [`HealthBucket`] - Four-tier health classification of a 0-100 score
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use auramon_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all auramon crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use types::{
    AlertLevel, AlertRecord, AlertSeverity, AlertsResponse, HealthBucket, MachineDetail,
    MachineId, MachineReadings, MachineSnapshot, MaintenanceActivity, MaintenanceLogEntry,
    MaintenanceRequest, ReadingPoint, ServiceHealth, StatusResponse,
};
