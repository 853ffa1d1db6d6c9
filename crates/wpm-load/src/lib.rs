//! WPM load testing client and data models.
//!
//! Provides the endpoint table and an asynchronous client for the WPM load
//! testing service (`load`). Load test methods carry the API version inside
//! the method path, so request URLs contain the version twice
//! (`/load/1.0/1.0/whoami`); the service expects that shape.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{LoadTestClient, CATALOG};
pub use models::{
    ListTestsQuery, LoadTest, LoadTestEnvelope, PartType, Region, ScheduleLoadTestRequest,
    ScriptShare, TestPart, UnknownRegion, WhoAmI,
};

/// Convenient result alias that reuses the shared WPM error type.
pub type Result<T> = wpm_core::Result<T>;
