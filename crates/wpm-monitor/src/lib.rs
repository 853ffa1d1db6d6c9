//! WPM monitor client and data models.
//!
//! Provides the endpoint table and an asynchronous client for the WPM
//! synthetic monitoring service (`monitor`).

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{MonitorClient, CATALOG};
pub use models::{CreatedMonitor, DateRange, Location, Monitor, MonitorRequest, MonitorSample};

/// Convenient result alias that reuses the shared WPM error type.
pub type Result<T> = wpm_core::Result<T>;
