//! RUM request and response models.
//!
//! The data endpoints share a beacon id and date range; filters come on top.
//! Boolean switches go over the wire as `1`/`0`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;
use wpm_core::ids::BeaconId;
use wpm_core::params::flag;

/// Format for `startDate` and `endDate`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn serialize_date_time<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(DATE_TIME_FORMAT))
}

/// Body of `createBeacon` and `updateBeacon`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BeaconRequest {
    /// Beacon name.
    pub beacon_name: String,
}

impl BeaconRequest {
    /// Request with the given name.
    #[must_use]
    pub fn new(beacon_name: impl Into<String>) -> Self {
        Self {
            beacon_name: beacon_name.into(),
        }
    }
}

/// Query for `getPerformanceSummaryOnRecentData` and
/// `getRecentTimeSeriesData`.
///
/// Only built through [`RecentDataQuery::for_beacon`] and
/// [`RecentDataQuery::all_beacons`], so `minutes` is always in range.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecentDataQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    beacon_id: Option<BeaconId>,
    #[validate(range(min = 1, max = 60))]
    minutes: u8,
    #[serde(
        rename = "allbeacons",
        with = "flag",
        skip_serializing_if = "Option::is_none"
    )]
    all_beacons: Option<bool>,
}

impl RecentDataQuery {
    /// Query for one beacon.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `minutes` is between 1 and 60.
    pub fn for_beacon(beacon_id: BeaconId, minutes: u8) -> crate::Result<Self> {
        let query = Self {
            beacon_id: Some(beacon_id),
            minutes,
            all_beacons: None,
        };
        query.validate()?;
        Ok(query)
    }

    /// Query across every beacon.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `minutes` is between 1 and 60.
    pub fn all_beacons(minutes: u8) -> crate::Result<Self> {
        let query = Self {
            beacon_id: None,
            minutes,
            all_beacons: Some(true),
        };
        query.validate()?;
        Ok(query)
    }

    /// Beacon reported on, if any.
    #[must_use]
    pub const fn beacon_id(&self) -> Option<&BeaconId> {
        self.beacon_id.as_ref()
    }

    /// Minutes aggregated over.
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Whether every beacon is summarised.
    #[must_use]
    pub fn covers_all_beacons(&self) -> bool {
        self.all_beacons.unwrap_or(false)
    }
}

/// Beacon and date range shared by the historical data queries.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RumDateRange {
    /// Beacon to report on; all beacons when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beacon_id: Option<BeaconId>,
    /// Range start.
    #[serde(serialize_with = "serialize_date_time")]
    pub start_date: NaiveDateTime,
    /// Range end.
    #[serde(serialize_with = "serialize_date_time")]
    pub end_date: NaiveDateTime,
}

impl RumDateRange {
    /// Range over every beacon.
    #[must_use]
    pub const fn new(start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        Self {
            beacon_id: None,
            start_date,
            end_date,
        }
    }

    /// Restrict to one beacon.
    #[must_use]
    pub fn with_beacon(mut self, beacon_id: BeaconId) -> Self {
        self.beacon_id = Some(beacon_id);
        self
    }
}

/// Sample filters shared by raw and analysis queries.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RumFilters {
    /// Regular expression on the page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Browser type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    /// Connection type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// JavaScript error file name or message (regular expression).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jserr: Option<String>,
}

/// Query for `getTimeSeriesData`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimeSeriesQuery {
    /// Beacon and range.
    #[serde(flatten)]
    pub range: RumDateRange,
    /// `daily` for day level data, minute level otherwise.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub series_type: Option<String>,
}

/// Page load time ordering for raw samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Fastest first.
    Asc,
    /// Slowest first.
    Desc,
}

/// Query for `getRawData`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RawDataQuery {
    /// Beacon and range.
    #[serde(flatten)]
    pub range: RumDateRange,
    /// Position to start from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Number of samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Order by page load time.
    #[serde(rename = "orderbypageloadtime", skip_serializing_if = "Option::is_none")]
    pub order_by_page_load_time: Option<SortOrder>,
    /// Only samples with JavaScript errors.
    #[serde(
        rename = "errorsonly",
        with = "flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub errors_only: Option<bool>,
    /// Exact page URL.
    #[serde(rename = "urlexact", skip_serializing_if = "Option::is_none")]
    pub url_exact: Option<String>,
    /// Further filters.
    #[serde(flatten)]
    pub filters: RumFilters,
}

impl RawDataQuery {
    /// Unfiltered query over a range.
    #[must_use]
    pub fn new(range: RumDateRange) -> Self {
        Self {
            range,
            offset: None,
            limit: None,
            order_by_page_load_time: None,
            errors_only: None,
            url_exact: None,
            filters: RumFilters::default(),
        }
    }
}

/// Query for `getAnalysisData`.
///
/// Either `group_by` is set or `over_time` is `true`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnalysisQuery {
    /// Beacon and range.
    #[serde(flatten)]
    pub range: RumDateRange,
    /// Key to group by, e.g. `url`.
    #[serde(rename = "groupby", skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    /// Return results over time.
    #[serde(
        rename = "overtime",
        with = "flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub over_time: Option<bool>,
    /// Further filters.
    #[serde(flatten)]
    pub filters: RumFilters,
}

impl AnalysisQuery {
    /// Query grouped by `group_by`.
    #[must_use]
    pub fn grouped_by(range: RumDateRange, group_by: impl Into<String>) -> Self {
        Self {
            range,
            group_by: Some(group_by.into()),
            over_time: None,
            filters: RumFilters::default(),
        }
    }

    /// Query returning results over time.
    #[must_use]
    pub fn over_time(range: RumDateRange) -> Self {
        Self {
            range,
            group_by: None,
            over_time: Some(true),
            filters: RumFilters::default(),
        }
    }
}

/// Grouping keys for object level outliers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ObjectGroupBy {
    /// Per resource.
    Resource,
    /// Per domain.
    Domain,
    /// Per location and resource.
    LocationResource,
    /// Per location and domain.
    LocationDomain,
}

/// Query for `getObjectLevelTimeSeriesData` and `getObjectLevelOutliersData`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ObjectLevelQuery {
    /// Beacon and range.
    #[serde(flatten)]
    pub range: RumDateRange,
    /// Grouping, used by the outlier query.
    #[serde(rename = "groupby", skip_serializing_if = "Option::is_none")]
    pub group_by: Option<ObjectGroupBy>,
}

/// Beacon preferences as returned by `listBeacons`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BeaconPreferences {
    /// Beacon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beacon_name: Option<String>,
}

/// A beacon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Beacon {
    /// Beacon id.
    pub beacon_id: BeaconId,
    /// Preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<BeaconPreferences>,
}

impl Beacon {
    /// Beacon name, if the preferences carry one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.preferences
            .as_ref()
            .and_then(|prefs| prefs.beacon_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wpm_core::{Error, ToParams};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 12, 6)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn beacon() -> BeaconId {
        BeaconId::new("b1").unwrap()
    }

    #[test]
    fn recent_query_validates_minutes() {
        assert!(RecentDataQuery::for_beacon(beacon(), 60).is_ok());
        assert!(matches!(
            RecentDataQuery::all_beacons(0),
            Err(Error::ValidationError(_))
        ));
        assert!(RecentDataQuery::all_beacons(61).is_err());
    }

    #[test]
    fn recent_query_params() {
        let query = RecentDataQuery::all_beacons(60).unwrap();
        assert_eq!(
            query.to_params().unwrap().to_query_suffix(),
            "&minutes=60&allbeacons=1"
        );

        let query = RecentDataQuery::for_beacon(beacon(), 15).unwrap();
        assert_eq!(
            query.to_params().unwrap().to_query_suffix(),
            "&beaconId=b1&minutes=15"
        );
    }

    #[test]
    fn raw_query_flattens_range_and_filters() {
        let mut query = RawDataQuery::new(RumDateRange::new(at(5), at(10)).with_beacon(beacon()));
        query.limit = Some(50);
        query.order_by_page_load_time = Some(SortOrder::Desc);
        query.errors_only = Some(false);
        query.filters.country = Some("US".into());

        assert_eq!(
            query.to_params().unwrap().to_query_suffix(),
            "&beaconId=b1&startDate=2013-12-06T05:00:00&endDate=2013-12-06T10:00:00\
             &limit=50&orderbypageloadtime=desc&errorsonly=0&country=US"
        );
    }

    #[test]
    fn analysis_and_object_level_queries() {
        let range = RumDateRange::new(at(5), at(10));

        let grouped = AnalysisQuery::grouped_by(range.clone(), "url");
        assert_eq!(
            grouped.to_params().unwrap().get("groupby"),
            Some(&serde_json::json!("url"))
        );

        let overtime = AnalysisQuery::over_time(range.clone());
        assert_eq!(
            overtime.to_params().unwrap().get("overtime"),
            Some(&serde_json::json!(1))
        );

        let outliers = ObjectLevelQuery {
            range,
            group_by: Some(ObjectGroupBy::LocationResource),
        };
        assert!(outliers
            .to_params()
            .unwrap()
            .to_query_suffix()
            .ends_with("&groupby=location_resource"));
    }

    #[test]
    fn beacon_name_from_preferences() {
        let beacon: Beacon = serde_json::from_value(serde_json::json!({
            "beaconId": "b1",
            "preferences": {"beaconName": "APITEST_K3J8QZ0A"}
        }))
        .unwrap();
        assert_eq!(beacon.name(), Some("APITEST_K3J8QZ0A"));
    }
}
