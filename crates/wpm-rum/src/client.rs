//! Asynchronous RUM client implementation.

use crate::Result;
use wpm_core::ids::BeaconId;
use wpm_core::{
    ApiResponse, Catalog, Credentials, Endpoint, Error, HttpVerb, Params, Payload, Service,
    ToParams, WpmClient, WpmClientConfig,
};

/// Accepted range of the `minutes` parameter of the recent-data queries.
pub const RECENT_MINUTES: std::ops::RangeInclusive<u64> = 1..=60;

const fn rum(name: &'static str, path: &'static str, verb: HttpVerb, payload: Payload) -> Endpoint {
    Endpoint::new(name, Service::Rum, path, verb, payload)
}

/// Create a beacon.
pub const CREATE_BEACON: Endpoint = rum("createBeacon", "beacon", HttpVerb::Post, Payload::Body);
/// List beacons.
pub const LIST_BEACONS: Endpoint = rum("listBeacons", "beacon", HttpVerb::Get, Payload::None);
/// Rename a beacon.
pub const UPDATE_BEACON: Endpoint =
    rum("updateBeacon", "beacon/{beacon_id}", HttpVerb::Put, Payload::Body);
/// Delete a beacon.
pub const DELETE_BEACON: Endpoint =
    rum("deleteBeacon", "beacon/{beacon_id}", HttpVerb::Delete, Payload::None);
/// Performance summary over the last minutes.
pub const GET_PERFORMANCE_SUMMARY_ON_RECENT_DATA: Endpoint = rum(
    "getPerformanceSummaryOnRecentData",
    "data/summary",
    HttpVerb::Get,
    Payload::Query,
);
/// Time series over the last minutes.
pub const GET_RECENT_TIME_SERIES_DATA: Endpoint = rum(
    "getRecentTimeSeriesData",
    "data/ts/recent",
    HttpVerb::Get,
    Payload::Query,
);
/// Time series over a date range.
pub const GET_TIME_SERIES_DATA: Endpoint =
    rum("getTimeSeriesData", "data/ts", HttpVerb::Get, Payload::Query);
/// Raw samples.
pub const GET_RAW_DATA: Endpoint = rum("getRawData", "data/raw", HttpVerb::Get, Payload::Query);
/// Grouped or over-time analysis.
pub const GET_ANALYSIS_DATA: Endpoint =
    rum("getAnalysisData", "data/analysis", HttpVerb::Get, Payload::Query);
/// Object level time series.
pub const GET_OBJECT_LEVEL_TIME_SERIES_DATA: Endpoint = rum(
    "getObjectLevelTimeSeriesData",
    "data/ol/ts",
    HttpVerb::Get,
    Payload::Query,
);
/// Object level outliers.
pub const GET_OBJECT_LEVEL_OUTLIERS_DATA: Endpoint = rum(
    "getObjectLevelOutliersData",
    "data/ol/outlier",
    HttpVerb::Get,
    Payload::Query,
);

/// Every RUM endpoint.
pub static CATALOG: Catalog = Catalog {
    service: Service::Rum,
    endpoints: &[
        CREATE_BEACON,
        LIST_BEACONS,
        UPDATE_BEACON,
        DELETE_BEACON,
        GET_PERFORMANCE_SUMMARY_ON_RECENT_DATA,
        GET_RECENT_TIME_SERIES_DATA,
        GET_TIME_SERIES_DATA,
        GET_RAW_DATA,
        GET_ANALYSIS_DATA,
        GET_OBJECT_LEVEL_TIME_SERIES_DATA,
        GET_OBJECT_LEVEL_OUTLIERS_DATA,
    ],
};

/// Asynchronous client for the `rum` service.
#[derive(Debug, Clone)]
pub struct RumClient {
    inner: WpmClient,
}

impl RumClient {
    /// Construct a client with the default HTTP stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: WpmClientConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self::from_client(WpmClient::new(config, credentials)?))
    }

    /// Wrap an existing dispatcher.
    #[must_use]
    pub const fn from_client(inner: WpmClient) -> Self {
        Self { inner }
    }

    /// The underlying dispatcher.
    #[must_use]
    pub const fn inner(&self) -> &WpmClient {
        &self.inner
    }

    /// Create a beacon from a [`crate::BeaconRequest`].
    pub async fn create_beacon<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner.call_with(&CREATE_BEACON, &[], params).await
    }

    /// List beacons.
    pub async fn list_beacons(&self) -> Result<ApiResponse> {
        self.inner.call(&LIST_BEACONS, &[], None).await
    }

    /// Update a beacon.
    pub async fn update_beacon<P>(&self, beacon_id: &BeaconId, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&UPDATE_BEACON, &[beacon_id.as_str()], params)
            .await
    }

    /// Delete a beacon.
    pub async fn delete_beacon(&self, beacon_id: &BeaconId) -> Result<ApiResponse> {
        self.inner
            .call(&DELETE_BEACON, &[beacon_id.as_str()], None)
            .await
    }

    /// Summary over recent data; `params` usually a [`crate::RecentDataQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] without sending anything unless
    /// `minutes` is between 1 and 60.
    pub async fn get_performance_summary_on_recent_data<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.recent_query(&GET_PERFORMANCE_SUMMARY_ON_RECENT_DATA, params)
            .await
    }

    /// Recent time series; `params` usually a [`crate::RecentDataQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] without sending anything unless
    /// `minutes` is between 1 and 60.
    pub async fn get_recent_time_series_data<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.recent_query(&GET_RECENT_TIME_SERIES_DATA, params).await
    }

    /// Time series; `params` usually a [`crate::TimeSeriesQuery`].
    pub async fn get_time_series_data<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.query(&GET_TIME_SERIES_DATA, params).await
    }

    /// Raw samples; `params` usually a [`crate::RawDataQuery`].
    pub async fn get_raw_data<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.query(&GET_RAW_DATA, params).await
    }

    /// Analysis data; `params` usually an [`crate::AnalysisQuery`].
    pub async fn get_analysis_data<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.query(&GET_ANALYSIS_DATA, params).await
    }

    /// Object level time series; `params` usually an [`crate::ObjectLevelQuery`].
    pub async fn get_object_level_time_series_data<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.query(&GET_OBJECT_LEVEL_TIME_SERIES_DATA, params).await
    }

    /// Object level outliers; `params` usually an [`crate::ObjectLevelQuery`].
    pub async fn get_object_level_outliers_data<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.query(&GET_OBJECT_LEVEL_OUTLIERS_DATA, params).await
    }

    async fn query<P>(&self, endpoint: &Endpoint, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner.call_with(endpoint, &[], params).await
    }

    async fn recent_query<P>(&self, endpoint: &Endpoint, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        let params = params.to_params()?;
        check_recent_minutes(&params)?;
        self.inner.call(endpoint, &[], Some(params)).await
    }
}

impl From<WpmClient> for RumClient {
    fn from(inner: WpmClient) -> Self {
        Self::from_client(inner)
    }
}

fn check_recent_minutes(params: &Params) -> Result<()> {
    let minutes = params.get("minutes").and_then(|value| {
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    });
    match minutes {
        Some(minutes) if RECENT_MINUTES.contains(&minutes) => Ok(()),
        _ => Err(Error::ValidationError(
            "minutes must be between 1 and 60".to_string(),
        )),
    }
}
