//! Load test request and response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use wpm_core::ids::{LoadTestId, ScriptId};

/// Format the scheduler expects for `start`.
pub const START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000+0000";

/// Region a load test runs from, sent as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Washington, D.C.
    UsEast,
    /// San Francisco
    UsWest,
    /// Dublin
    EuWest,
    /// Singapore
    ApSoutheast,
    /// Tokyo
    ApNortheast,
    /// São Paulo
    SaoPaulo,
    /// Oregon
    Oregon,
    /// Sydney
    Sydney,
    /// Several regions at once
    MultiRegion,
}

/// A region code outside `0..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown load test region code {0}")]
pub struct UnknownRegion(pub u8);

impl Region {
    /// Integer code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::UsEast => 0,
            Self::UsWest => 1,
            Self::EuWest => 2,
            Self::ApSoutheast => 3,
            Self::ApNortheast => 4,
            Self::SaoPaulo => 5,
            Self::Oregon => 6,
            Self::Sydney => 7,
            Self::MultiRegion => 8,
        }
    }
}

impl TryFrom<u8> for Region {
    type Error = UnknownRegion;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::UsEast,
            1 => Self::UsWest,
            2 => Self::EuWest,
            3 => Self::ApSoutheast,
            4 => Self::ApNortheast,
            5 => Self::SaoPaulo,
            6 => Self::Oregon,
            7 => Self::Sydney,
            8 => Self::MultiRegion,
            other => return Err(UnknownRegion(other)),
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Self::try_from(code).map_err(serde::de::Error::custom)
    }
}

/// Share of virtual users running one script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptShare {
    /// Percentage of users, 0-100.
    pub percentage: u8,
    /// Script to run.
    pub script_id: ScriptId,
}

/// Shape of one test plan phase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartType {
    /// Ramp linearly up to `max_users`.
    Ramp,
    /// Hold `max_users` for the whole phase.
    Constant,
}

/// One phase of the test plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestPart {
    /// Phase length in minutes.
    pub duration: u32,
    /// Peak virtual users.
    pub max_users: u32,
    /// Phase shape.
    #[serde(rename = "type")]
    pub part_type: PartType,
}

/// Body of `scheduleLoadTest`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLoadTestRequest {
    /// Test name.
    pub name: String,
    /// Region to run from.
    pub region: Region,
    /// Start time.
    #[serde(serialize_with = "serialize_start")]
    pub start: DateTime<Utc>,
    /// Scripts and their user shares.
    pub scripts: Vec<ScriptShare>,
    /// Override code, empty when unused.
    pub override_code: String,
    /// Test plan.
    pub parts: Vec<TestPart>,
}

fn serialize_start<S>(start: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&start.format(START_FORMAT))
}

/// Query for the test list endpoints.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ListTestsQuery {
    /// Maximum number of tests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// JSONP callback name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

impl ListTestsQuery {
    /// Query limited to `limit` tests.
    #[must_use]
    pub const fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            callback: None,
        }
    }
}

/// A load test as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadTest {
    /// Load test id.
    pub id: LoadTestId,
    /// Test name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lifecycle state, e.g. `SCHEDULED`, `RUNNING`, `COMPLETED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Region code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    /// Start time as reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// `data` payload of `getLoadTest` and `scheduleLoadTest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestEnvelope {
    /// The load test.
    pub load_test: LoadTest,
}

/// `data` payload of `whoAmI`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhoAmI {
    /// Account user name.
    pub username: String,
}
