//! Request signing.
//!
//! Every request carries `sig = hex(md5(api_key + api_secret + unix_seconds))`.
//! The server compares the signature against its own clock, so the timestamp
//! is sampled when the signature is computed and never reused across calls.
//!
//! MD5 over an unsalted concatenation is weak. It is kept because the WPM API
//! accepts nothing else.

use chrono::Utc;

/// Compute the request signature for a given Unix timestamp in seconds.
#[must_use]
pub fn signature(api_key: &str, api_secret: &str, timestamp: i64) -> String {
    let input = format!("{api_key}{api_secret}{timestamp}");
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// Current Unix time in whole seconds.
#[must_use]
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Compute the request signature for the current second.
#[must_use]
pub fn signature_now(api_key: &str, api_secret: &str) -> String {
    signature(api_key, api_secret, current_timestamp())
}
