//! WPM maintenance window client and data models.
//!
//! Maintenance windows suppress monitor alerts for a period. The service
//! has no method beyond the version segment, so every path starts with it.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{MaintenanceClient, CATALOG};
pub use models::{MaintenanceWindow, MaintenanceWindowRequest, Recurrence};

/// Convenient result alias that reuses the shared WPM error type.
pub type Result<T> = wpm_core::Result<T>;
