//! Instant test request and response models.

use serde::{Deserialize, Serialize};
use wpm_core::ids::InstantTestId;

/// Body of `createInstantTestJob`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstantTestRequest {
    /// Page to load.
    pub url: String,
    /// URL the results are posted to when the job finishes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

impl InstantTestRequest {
    /// Test `url` without a callback.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            callback: None,
        }
    }

    /// Post results to `callback`.
    #[must_use]
    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }
}

/// A location the job was dispatched to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobLocation {
    /// Per-location run id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Location name, used by `getInstantTestJobByLocation`.
    pub location: String,
}

/// `createInstantTestJob` response items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstantTestJob {
    /// Job id.
    pub id: InstantTestId,
    /// Locations the job runs from.
    #[serde(default)]
    pub locations: Vec<JobLocation>,
}

/// Result of a job at one location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstantTestResult {
    /// Location name.
    pub location: String,
    /// Job status at this location, e.g. `NEW`, `RUNNING`, `COMPLETE`.
    pub status: String,
    /// Page load time in milliseconds once complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// HTTP status of the tested page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
}
