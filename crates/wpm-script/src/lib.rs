//! WPM script management client and data models.
//!
//! Script methods start with `script`, so their URLs carry no version
//! segment. Uploads read the script body from disk.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ScriptClient, CATALOG};
pub use models::{Script, ScriptEnvelope, ScriptRequest};

/// Convenient result alias that reuses the shared WPM error type.
pub type Result<T> = wpm_core::Result<T>;
