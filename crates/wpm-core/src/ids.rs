//! Strongly-typed identifiers for WPM resources.
//!
//! WPM ids are opaque strings that are spliced into request paths, so each
//! wrapper rejects values that would change the shape of the URL.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Some endpoints return numeric ids, others strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Macro to generate strongly-typed id wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id after checking it is safe to use as a path segment.
            ///
            /// # Errors
            ///
            /// Returns an error if the id is empty or contains `/`, `?`, `&`,
            /// `#` or whitespace.
            pub fn new(id: impl Into<String>) -> Result<Self> {
                let id = id.into();
                validate_id(&id)?;
                Ok(Self(id))
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Converts into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let id = RawId::deserialize(deserializer)?.into_string();
                validate_id(&id).map_err(serde::de::Error::custom)?;
                Ok(Self(id))
            }
        }
    };
}

id_type!(MonitorId, "Monitor id");
id_type!(SampleId, "Monitoring sample id");
id_type!(LoadTestId, "Load test id");
id_type!(BeaconId, "RUM beacon id");
id_type!(InstantTestId, "Instant test job id");
id_type!(MaintenanceWindowId, "Maintenance window id");
id_type!(ScriptId, "Script id");

/// Validates a string for use as a single request path segment.
///
/// # Errors
///
/// Returns an error if the string is empty or contains a URL delimiter.
pub fn validate_id(s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(Error::InvalidRequest("id must not be empty".to_string()));
    }
    if s.chars()
        .any(|c| matches!(c, '/' | '?' | '&' | '#') || c.is_whitespace())
    {
        return Err(Error::InvalidRequest(format!(
            "id `{s}` contains characters that are not allowed in a path segment"
        )));
    }
    Ok(())
}
