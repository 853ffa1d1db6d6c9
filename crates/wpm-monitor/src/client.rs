//! Asynchronous monitor client implementation.

use crate::Result;
use wpm_core::ids::{MonitorId, SampleId};
use wpm_core::{
    ApiResponse, Catalog, Credentials, Endpoint, HttpVerb, Payload, Service, ToParams, WpmClient,
    WpmClientConfig,
};

const fn monitor(name: &'static str, path: &'static str, verb: HttpVerb, payload: Payload) -> Endpoint {
    Endpoint::new(name, Service::Monitor, path, verb, payload)
}

/// Create a monitor.
pub const CREATE_MONITOR: Endpoint = monitor("createMonitor", "", HttpVerb::Post, Payload::Body);
/// List monitors.
pub const LIST_MONITORS: Endpoint = monitor("listMonitors", "", HttpVerb::Get, Payload::None);
/// Fetch one monitor.
pub const GET_MONITOR: Endpoint =
    monitor("getMonitor", "{monitor_id}", HttpVerb::Get, Payload::None);
/// Update a monitor.
pub const UPDATE_MONITOR: Endpoint =
    monitor("updateMonitor", "{monitor_id}", HttpVerb::Put, Payload::Body);
/// Delete a monitor.
pub const DELETE_MONITOR: Endpoint =
    monitor("deleteMonitor", "{monitor_id}", HttpVerb::Delete, Payload::None);
/// Samples for a monitor over a date range.
pub const GET_MONITOR_SAMPLES: Endpoint = monitor(
    "getMonitorSamples",
    "{monitor_id}/sample",
    HttpVerb::Get,
    Payload::Query,
);
/// Raw data for one sample.
pub const GET_RAW_MONITOR_SAMPLE: Endpoint = monitor(
    "getRawMonitorSample",
    "{monitor_id}/sample/{sample_id}",
    HttpVerb::Get,
    Payload::None,
);
/// Aggregated data for a monitor over a date range.
pub const GET_AGGREGATE_MONITOR_DATA: Endpoint = monitor(
    "getAggregateMonitorData",
    "{monitor_id}/aggregate",
    HttpVerb::Get,
    Payload::Query,
);
/// Summary for a monitor.
pub const GET_MONITOR_SUMMARY: Endpoint = monitor(
    "getMonitorSummary",
    "{monitor_id}/summary",
    HttpVerb::Get,
    Payload::None,
);
/// Available monitoring locations.
pub const GET_LOCATIONS: Endpoint =
    monitor("getLocations", "locations", HttpVerb::Get, Payload::None);

/// Every monitor endpoint.
pub static CATALOG: Catalog = Catalog {
    service: Service::Monitor,
    endpoints: &[
        CREATE_MONITOR,
        LIST_MONITORS,
        GET_MONITOR,
        UPDATE_MONITOR,
        DELETE_MONITOR,
        GET_MONITOR_SAMPLES,
        GET_RAW_MONITOR_SAMPLE,
        GET_AGGREGATE_MONITOR_DATA,
        GET_MONITOR_SUMMARY,
        GET_LOCATIONS,
    ],
};

/// Asynchronous client for the `monitor` service.
///
/// Every method returns the raw [`ApiResponse`]; decode the body with
/// [`ApiResponse::json`] and the models in [`crate::models`].
#[derive(Debug, Clone)]
pub struct MonitorClient {
    inner: WpmClient,
}

impl MonitorClient {
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

    /// Create a monitor from a [`crate::MonitorRequest`] or any parameter mapping.
    pub async fn create_monitor<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner.call_with(&CREATE_MONITOR, &[], params).await
    }

    /// List monitors.
    pub async fn list_monitors(&self) -> Result<ApiResponse> {
        self.inner.call(&LIST_MONITORS, &[], None).await
    }

    /// Fetch a monitor.
    pub async fn get_monitor(&self, monitor_id: &MonitorId) -> Result<ApiResponse> {
        self.inner
            .call(&GET_MONITOR, &[monitor_id.as_str()], None)
            .await
    }

    /// Update a monitor.
    pub async fn update_monitor<P>(&self, monitor_id: &MonitorId, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&UPDATE_MONITOR, &[monitor_id.as_str()], params)
            .await
    }

    /// Delete a monitor.
    pub async fn delete_monitor(&self, monitor_id: &MonitorId) -> Result<ApiResponse> {
        self.inner
            .call(&DELETE_MONITOR, &[monitor_id.as_str()], None)
            .await
    }

    /// Samples for a monitor; `params` usually a [`crate::DateRange`].
    pub async fn get_monitor_samples<P>(&self, monitor_id: &MonitorId, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&GET_MONITOR_SAMPLES, &[monitor_id.as_str()], params)
            .await
    }

    /// Raw data for one sample.
    pub async fn get_raw_monitor_sample(
        &self,
        monitor_id: &MonitorId,
        sample_id: &SampleId,
    ) -> Result<ApiResponse> {
        self.inner
            .call(
                &GET_RAW_MONITOR_SAMPLE,
                &[monitor_id.as_str(), sample_id.as_str()],
                None,
            )
            .await
    }

    /// Aggregated data; `params` usually a [`crate::DateRange`].
    pub async fn get_aggregate_monitor_data<P>(
        &self,
        monitor_id: &MonitorId,
        params: &P,
    ) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&GET_AGGREGATE_MONITOR_DATA, &[monitor_id.as_str()], params)
            .await
    }

    /// Summary for a monitor.
    pub async fn get_monitor_summary(&self, monitor_id: &MonitorId) -> Result<ApiResponse> {
        self.inner
            .call(&GET_MONITOR_SUMMARY, &[monitor_id.as_str()], None)
            .await
    }

    /// Available monitoring locations.
    pub async fn get_locations(&self) -> Result<ApiResponse> {
        self.inner.call(&GET_LOCATIONS, &[], None).await
    }
}

impl From<WpmClient> for MonitorClient {
    fn from(inner: WpmClient) -> Self {
        Self::from_client(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatedMonitor, DateRange, Location, Monitor, MonitorRequest};
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wpm_core::response::{Envelope, Items};

    const MONITOR_ID: &str = "383b86b85d2411e3a8d89848e167c3b7";

    fn test_client(server: &MockServer) -> MonitorClient {
        let config = WpmClientConfig::new(server.uri()).unwrap();
        MonitorClient::new(config, Credentials::new("KEY", "SECRET")).unwrap()
    }

    fn monitor_id() -> MonitorId {
        MonitorId::new(MONITOR_ID).unwrap()
    }

    #[test]
    fn catalog_covers_every_operation() {
        let names: Vec<_> = CATALOG.names().collect();
        assert_eq!(names.len(), 10);
        assert!(CATALOG
            .endpoints
            .iter()
            .all(|endpoint| endpoint.service == Service::Monitor));
        assert_eq!(
            CATALOG.endpoint("getRawMonitorSample"),
            Some(&GET_RAW_MONITOR_SAMPLE)
        );
    }

    #[tokio::test]
    async fn create_monitor_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/monitor/1.0"))
            .and(query_param("apikey", "KEY"))
            .and(body_json(json!({
                "name": "myServiceTest",
                "interval": 60,
                "locations": "washingtondc,london"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"items": {"id": MONITOR_ID}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = MonitorRequest {
            interval: Some(60),
            locations: vec!["washingtondc".into(), "london".into()],
            ..MonitorRequest::new("myServiceTest")
        };

        let rsp = client.create_monitor(&request).await.unwrap();
        let created: Envelope<Items<CreatedMonitor>> = rsp.json().unwrap();
        assert_eq!(created.data.items.id, monitor_id());
    }

    #[tokio::test]
    async fn get_monitor_returns_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/monitor/1.0/{MONITOR_ID}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [{
                    "id": MONITOR_ID,
                    "name": "myServiceTest",
                    "description": "UPDATED DESCRIPTION!",
                    "interval": 60
                }]}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let rsp = client.get_monitor(&monitor_id()).await.unwrap();
        let monitors: Envelope<Items<Vec<Monitor>>> = rsp.json().unwrap();
        assert_eq!(
            monitors.data.items[0].description.as_deref(),
            Some("UPDATED DESCRIPTION!")
        );
    }

    #[tokio::test]
    async fn update_monitor_puts_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/monitor/1.0/{MONITOR_ID}").as_str()))
            .and(body_json(json!({"description": "UPDATED DESCRIPTION!"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let update = json!({"description": "UPDATED DESCRIPTION!"});
        let rsp = client.update_monitor(&monitor_id(), &update).await.unwrap();
        assert!(rsp.is_success());
    }

    #[tokio::test]
    async fn delete_monitor_not_found_is_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/monitor/1.0/{MONITOR_ID}").as_str()))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let rsp = client.delete_monitor(&monitor_id()).await.unwrap();
        assert_eq!(rsp.status().as_u16(), 404);
        assert!(matches!(
            rsp.error_for_status(),
            Err(wpm_core::Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn samples_send_date_range_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/monitor/1.0/{MONITOR_ID}/sample").as_str()))
            .and(query_param("startDate", "2013-02-03"))
            .and(query_param("endDate", "2013-02-04"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"items": []}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2013, 2, 3).unwrap(),
            NaiveDate::from_ymd_opt(2013, 2, 4).unwrap(),
        );
        client
            .get_monitor_samples(&monitor_id(), &range)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn raw_sample_and_summary_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/monitor/1.0/{MONITOR_ID}/sample/s1").as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/monitor/1.0/{MONITOR_ID}/summary").as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/monitor/1.0/{MONITOR_ID}/aggregate").as_str()))
            .and(query_param("startDate", "2013-02-03"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let sample = SampleId::new("s1").unwrap();
        client
            .get_raw_monitor_sample(&monitor_id(), &sample)
            .await
            .unwrap();
        client.get_monitor_summary(&monitor_id()).await.unwrap();
        client
            .get_aggregate_monitor_data(
                &monitor_id(),
                &json!({"startDate": "2013-02-03", "endDate": "2013-02-04"}),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_monitors_and_locations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/monitor/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [{"id": "a"}, {"id": "b"}]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/monitor/1.0/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [{"name": "washingtondc", "label": "Washington DC"}]}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let monitors: Envelope<Items<Vec<Monitor>>> =
            client.list_monitors().await.unwrap().json().unwrap();
        assert_eq!(monitors.data.items.len(), 2);

        let locations: Envelope<Items<Vec<Location>>> =
            client.get_locations().await.unwrap().json().unwrap();
        assert_eq!(locations.data.items[0].name, "washingtondc");
    }
}
