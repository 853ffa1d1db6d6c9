//! API key and secret.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::sign;

/// WPM API credentials.
///
/// The key is sent with every request; the secret only ever feeds the
/// signature and is redacted from `Debug` and `Display` output.
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and secret.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request issued at `timestamp` (Unix seconds).
    #[must_use]
    pub fn sign_at(&self, timestamp: i64) -> String {
        sign::signature(&self.api_key, self.api_secret.expose_secret(), timestamp)
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(
            self.api_key.clone(),
            self.api_secret.expose_secret().to_owned(),
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:[REDACTED]", self.api_key)
    }
}
