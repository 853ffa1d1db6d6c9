//! WPM real user monitoring client and data models.
//!
//! Provides the endpoint table and an asynchronous client for the WPM RUM
//! service (`rum`): beacon management and the beacon data queries.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{RumClient, CATALOG};
pub use models::{
    AnalysisQuery, Beacon, BeaconRequest, ObjectGroupBy, ObjectLevelQuery, RawDataQuery,
    RecentDataQuery, RumDateRange, RumFilters, SortOrder, TimeSeriesQuery,
};

/// Convenient result alias that reuses the shared WPM error type.
pub type Result<T> = wpm_core::Result<T>;
