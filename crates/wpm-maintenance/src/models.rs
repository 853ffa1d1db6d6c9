//! Maintenance window request and response models.
//!
//! The service takes `alert` and `duration` as strings and the affected
//! monitors as one comma-joined list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use wpm_core::ids::{MaintenanceWindowId, MonitorId};
use wpm_core::params::comma_separated;

/// Format for `startDate` (UTC, no offset).
pub const START_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// How often a window repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recurrence {
    /// Runs once.
    #[serde(rename = "1")]
    Once,
    /// Weekly.
    #[serde(rename = "W")]
    Weekly,
    /// Monthly.
    #[serde(rename = "M")]
    Monthly,
    /// Yearly.
    #[serde(rename = "Y")]
    Yearly,
}

/// Body of `createMaintenanceWindow` and `updateMaintenanceWindow`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindowRequest {
    /// Window name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Recurrence.
    pub recurrence: Recurrence,
    /// Whether monitors still alert during the window.
    #[serde(serialize_with = "serialize_as_string")]
    pub alert: bool,
    /// Window start.
    #[serde(serialize_with = "serialize_start_date")]
    pub start_date: DateTime<Utc>,
    /// Monitors the window applies to.
    #[serde(with = "comma_separated")]
    pub monitor: Vec<MonitorId>,
    /// Length in minutes.
    #[serde(serialize_with = "serialize_as_string")]
    pub duration: u32,
}

fn serialize_as_string<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

fn serialize_start_date<S>(start: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&start.format(START_DATE_FORMAT))
}

/// Accepts `true`, `"true"`, `60` or `"60"` alike.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Number(u32),
    Text(String),
}

fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Bool(b)) => Some(b),
        Some(Loose::Number(n)) => Some(n != 0),
        Some(Loose::Text(s)) => Some(s.eq_ignore_ascii_case("true") || s == "1"),
        None => None,
    })
}

fn deserialize_loose_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) => Ok(Some(n)),
        Some(Loose::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
        Some(Loose::Bool(_)) => Err(serde::de::Error::custom("duration must be a number")),
        None => Ok(None),
    }
}

/// A maintenance window as returned by the API.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindow {
    /// Window id.
    pub id: MaintenanceWindowId,
    /// Window name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Recurrence.
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    /// Whether monitors alert during the window.
    #[serde(default, deserialize_with = "deserialize_loose_bool")]
    pub alert: Option<bool>,
    /// Start as reported.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Comma-joined monitor ids.
    #[serde(default)]
    pub monitor: Option<String>,
    /// Length in minutes.
    #[serde(default, deserialize_with = "deserialize_loose_minutes")]
    pub duration: Option<u32>,
}

impl MaintenanceWindow {
    /// Monitor ids split out of the comma-joined field.
    #[must_use]
    pub fn monitor_ids(&self) -> Vec<&str> {
        self.monitor
            .as_deref()
            .map(|raw| raw.split(',').map(str::trim).filter(|id| !id.is_empty()).collect())
            .unwrap_or_default()
    }
}
