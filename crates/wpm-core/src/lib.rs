//! # wpm-core
//!
//! Core types and utilities for working with the Neustar Web Performance
//! Management (WPM) API.
//!
//! This crate signs requests, builds request URLs and dispatches them over a
//! pluggable HTTP transport. The per-service crates (`wpm-monitor`,
//! `wpm-load`, `wpm-rum`, `wpm-instant-test`, `wpm-maintenance`,
//! `wpm-script`) are thin endpoint tables on top of it.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Client configuration and validation
//! - [`credentials`] - API key and secret
//! - [`sign`] - Request signatures
//! - [`service`] - Service families and HTTP verbs
//! - [`params`] - Ordered request parameters
//! - [`ids`] - Strongly-typed resource identifiers
//! - [`request`] - Request specs and URL construction
//! - [`endpoint`] - Static endpoint tables
//! - [`response`] - Raw responses and JSON envelopes
//! - [`transport`] - HTTP transport trait and reqwest implementation
//! - [`client`] - The request dispatcher

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod ids;
pub mod params;
pub mod request;
pub mod response;
pub mod service;
pub mod sign;
pub mod transport;

// Re-export commonly used types
pub use client::{ClientConfig, WpmClient, WpmClientBuilder};
pub use config::WpmClientConfig;
pub use credentials::Credentials;
pub use endpoint::{Catalog, Endpoint, Payload};
pub use error::{Error, Result};
pub use params::{Params, ToParams};
pub use request::RequestSpec;
pub use response::{ApiResponse, Envelope, Items};
pub use service::{HttpVerb, Service};
pub use transport::{HttpTransport, ReqwestTransport};
