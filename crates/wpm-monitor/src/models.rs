//! Monitor request and response models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wpm_core::ids::{MonitorId, SampleId};
use wpm_core::params::{comma_separated, flag};

/// Monitor definition sent to `createMonitor` and `updateMonitor`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MonitorRequest {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sampling interval in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Script id or name to run, `default_script` for a plain URL check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_script: Option<String>,
    /// Monitoring location names, sent comma-joined.
    #[serde(
        default,
        with = "comma_separated",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub locations: Vec<String>,
    /// Browser to run the script in (`FF` or `CHROME`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    /// Whether the monitor is running, sent as `1`/`0`.
    #[serde(default, with = "flag", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl MonitorRequest {
    /// Create a request with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// `startDate`/`endDate` query used by sample and aggregate lookups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Create a range.
    #[must_use]
    pub const fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

/// Monitor as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    /// Monitor id.
    pub id: MonitorId,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sampling interval in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Script the monitor runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_script: Option<String>,
    /// Location names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<String>,
    /// Browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    /// Whether the monitor is running; the API may report `1`/`0`.
    #[serde(
        default,
        deserialize_with = "flag::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub active: Option<bool>,
}

impl Monitor {
    /// Location names split out of the comma-joined field.
    #[must_use]
    pub fn location_names(&self) -> Vec<&str> {
        self.locations
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// `createMonitor` returns only the new id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedMonitor {
    /// Id of the new monitor.
    pub id: MonitorId,
}

/// One monitoring sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSample {
    /// Sample id.
    pub id: SampleId,
    /// Start of the sample, as reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Location the sample ran from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `SUCCESS`, `WARNING` or `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Total duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

/// A monitoring location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    /// Location key used in monitor definitions.
    pub name: String,
    /// Human readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wpm_core::ToParams;

    #[test]
    fn monitor_request_params_follow_field_order() {
        let request = MonitorRequest {
            name: "myServiceTest".into(),
            description: Some("This is a test service".into()),
            interval: Some(60),
            test_script: Some("default_script".into()),
            locations: vec!["washingtondc".into(), "sanjose".into(), "london".into()],
            browser: None,
            active: None,
        };

        let params = request.to_params().unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["name", "description", "interval", "testScript", "locations"]
        );
        assert_eq!(
            params.get("locations"),
            Some(&json!("washingtondc,sanjose,london"))
        );
    }

    #[test]
    fn active_is_sent_as_digit() {
        let request = MonitorRequest {
            active: Some(false),
            ..MonitorRequest::new("svc")
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "svc", "active": 0})
        );

        let monitor: Monitor =
            serde_json::from_value(json!({"id": "m1", "active": "1"})).unwrap();
        assert_eq!(monitor.active, Some(true));
    }

    #[test]
    fn minimal_request_has_only_name() {
        let json = serde_json::to_value(MonitorRequest::new("svc")).unwrap();
        assert_eq!(json, json!({"name": "svc"}));
    }

    #[test]
    fn date_range_query() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2013, 2, 3).unwrap(),
            NaiveDate::from_ymd_opt(2013, 2, 4).unwrap(),
        );
        assert_eq!(
            range.to_params().unwrap().to_query_suffix(),
            "&startDate=2013-02-03&endDate=2013-02-04"
        );
    }

    #[test]
    fn location_names_split() {
        let monitor: Monitor = serde_json::from_value(json!({
            "id": "abc",
            "locations": "washingtondc, sanjose,"
        }))
        .unwrap();
        assert_eq!(monitor.location_names(), vec!["washingtondc", "sanjose"]);
    }
}
