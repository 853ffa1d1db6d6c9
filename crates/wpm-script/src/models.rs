//! Script request and response models.

use serde::{Deserialize, Serialize};
use wpm_core::ids::ScriptId;

/// Script metadata sent with `uploadScript` and `updateScript`.
///
/// The script body itself is read from a file by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    /// Script name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Validation state, e.g. `PROCESSING`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_state: Option<String>,
}

impl ScriptRequest {
    /// Request with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A stored script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Script id.
    pub id: ScriptId,
    /// Script name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Validation state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_state: Option<String>,
}

/// `data` payload of `uploadScript` and `getScript`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptEnvelope {
    /// The script.
    pub script: Script,
}
