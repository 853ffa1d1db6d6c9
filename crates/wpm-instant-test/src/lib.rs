//! WPM instant test client and data models.
//!
//! Instant tests are one-off page loads run from every location, exposed
//! under the `tools` service.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{InstantTestClient, CATALOG};
pub use models::{InstantTestJob, InstantTestRequest, InstantTestResult, JobLocation};

/// Convenient result alias that reuses the shared WPM error type.
pub type Result<T> = wpm_core::Result<T>;
