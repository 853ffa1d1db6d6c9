//! WPM API service families and HTTP verbs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Top-level WPM API service selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Synthetic monitoring
    Monitor,
    /// Load testing
    Load,
    /// Real-user monitoring
    Rum,
    /// Tools (instant tests)
    Tools,
    /// Maintenance windows
    Maintenance,
    /// Script management
    Script,
}

impl Service {
    /// Returns the path segment for the service.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Monitor => "monitor",
            Self::Load => "load",
            Self::Rum => "rum",
            Self::Tools => "tools",
            Self::Maintenance => "maintenance",
            Self::Script => "script",
        }
    }

    /// Returns all available services.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monitor,
            Self::Load,
            Self::Rum,
            Self::Tools,
            Self::Maintenance,
            Self::Script,
        ]
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|service| service.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidRequest(format!("Unknown service: {s}")))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP verbs accepted by the WPM API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
}

impl HttpVerb {
    /// Returns the upper-case verb name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel as a JSON request body for this verb.
    #[must_use]
    pub const fn sends_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl FromStr for HttpVerb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(Error::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
