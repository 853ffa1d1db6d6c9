//! Asynchronous load test client implementation.

use crate::Result;
use wpm_core::ids::{validate_id, LoadTestId};
use wpm_core::{
    ApiResponse, Catalog, Credentials, Endpoint, HttpVerb, Payload, Service, ToParams, WpmClient,
    WpmClientConfig,
};

const fn load(name: &'static str, path: &'static str, verb: HttpVerb, payload: Payload) -> Endpoint {
    Endpoint::new(name, Service::Load, path, verb, payload)
}

/// Echo a message back.
pub const ECHO_MESSAGE: Endpoint =
    load("echoMessage", "{version}/echo/{message}", HttpVerb::Get, Payload::None);
/// User name for the current credentials.
pub const WHO_AM_I: Endpoint = load("whoAmI", "{version}/whoami", HttpVerb::Get, Payload::None);
/// Most recent tests, optionally wrapped in a JSONP callback.
pub const GET_LIST_OF_TESTS_AS_JSON: Endpoint = load(
    "getListOfTestsAsJSON",
    "{version}/list/mostRecent",
    HttpVerb::Get,
    Payload::Query,
);
/// List tests.
pub const GET_LIST_OF_TESTS: Endpoint =
    load("getListOfTests", "{version}/list", HttpVerb::Get, Payload::Query);
/// Tag a load test.
pub const ADD_TAG: Endpoint = load(
    "addTag",
    "{version}/{load_test_id}/tag/{tag}",
    HttpVerb::Put,
    Payload::None,
);
/// Remove a tag from a load test.
pub const REMOVE_TAG: Endpoint = load(
    "removeTag",
    "{version}/{load_test_id}/tag/{tag}",
    HttpVerb::Delete,
    Payload::None,
);
/// Fetch a load test.
pub const GET_LOAD_TEST: Endpoint =
    load("getLoadTest", "{version}/id/{load_test_id}", HttpVerb::Get, Payload::None);
/// Delete a load test.
pub const DELETE_LOAD_TEST: Endpoint = load(
    "deleteLoadTest",
    "{version}/{load_test_id}/delete",
    HttpVerb::Delete,
    Payload::None,
);
/// Pause a running load test.
pub const PAUSE_LOAD_TEST: Endpoint = load(
    "pauseLoadTest",
    "{version}/{load_test_id}/pause",
    HttpVerb::Put,
    Payload::None,
);
/// Resume a paused load test.
pub const RESUME_LOAD_TEST: Endpoint = load(
    "resumeLoadTest",
    "{version}/{load_test_id}/resume",
    HttpVerb::Put,
    Payload::None,
);
/// Schedule a new load test.
pub const SCHEDULE_LOAD_TEST: Endpoint =
    load("scheduleLoadTest", "{version}/schedule", HttpVerb::Post, Payload::Body);

/// Every load test endpoint.
pub static CATALOG: Catalog = Catalog {
    service: Service::Load,
    endpoints: &[
        ECHO_MESSAGE,
        WHO_AM_I,
        GET_LIST_OF_TESTS_AS_JSON,
        GET_LIST_OF_TESTS,
        ADD_TAG,
        REMOVE_TAG,
        GET_LOAD_TEST,
        DELETE_LOAD_TEST,
        PAUSE_LOAD_TEST,
        RESUME_LOAD_TEST,
        SCHEDULE_LOAD_TEST,
    ],
};

/// Asynchronous client for the `load` service.
#[derive(Debug, Clone)]
pub struct LoadTestClient {
    inner: WpmClient,
}

impl LoadTestClient {
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

    /// Echo `message` back. The message becomes a path segment and may not
    /// contain spaces or URL delimiters.
    pub async fn echo_message(&self, message: &str) -> Result<ApiResponse> {
        validate_id(message)?;
        self.inner.call(&ECHO_MESSAGE, &[message], None).await
    }

    /// User name associated with the credentials.
    pub async fn who_am_i(&self) -> Result<ApiResponse> {
        self.inner.call(&WHO_AM_I, &[], None).await
    }

    /// Most recent tests; `params` usually a [`crate::ListTestsQuery`].
    pub async fn get_list_of_tests_as_json<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&GET_LIST_OF_TESTS_AS_JSON, &[], params)
            .await
    }

    /// List tests; `params` usually [`crate::ListTestsQuery::with_limit`].
    pub async fn get_list_of_tests<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner.call_with(&GET_LIST_OF_TESTS, &[], params).await
    }

    /// Tag a load test.
    pub async fn add_tag(&self, load_test_id: &LoadTestId, tag: &str) -> Result<ApiResponse> {
        validate_id(tag)?;
        self.inner
            .call(&ADD_TAG, &[load_test_id.as_str(), tag], None)
            .await
    }

    /// Remove a tag from a load test.
    pub async fn remove_tag(&self, load_test_id: &LoadTestId, tag: &str) -> Result<ApiResponse> {
        validate_id(tag)?;
        self.inner
            .call(&REMOVE_TAG, &[load_test_id.as_str(), tag], None)
            .await
    }

    /// Fetch a load test.
    pub async fn get_load_test(&self, load_test_id: &LoadTestId) -> Result<ApiResponse> {
        self.inner
            .call(&GET_LOAD_TEST, &[load_test_id.as_str()], None)
            .await
    }

    /// Delete a load test.
    pub async fn delete_load_test(&self, load_test_id: &LoadTestId) -> Result<ApiResponse> {
        self.inner
            .call(&DELETE_LOAD_TEST, &[load_test_id.as_str()], None)
            .await
    }

    /// Pause a load test.
    pub async fn pause_load_test(&self, load_test_id: &LoadTestId) -> Result<ApiResponse> {
        self.inner
            .call(&PAUSE_LOAD_TEST, &[load_test_id.as_str()], None)
            .await
    }

    /// Resume a load test.
    pub async fn resume_load_test(&self, load_test_id: &LoadTestId) -> Result<ApiResponse> {
        self.inner
            .call(&RESUME_LOAD_TEST, &[load_test_id.as_str()], None)
            .await
    }

    /// Schedule a load test from a [`crate::ScheduleLoadTestRequest`].
    pub async fn schedule_load_test<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner.call_with(&SCHEDULE_LOAD_TEST, &[], params).await
    }
}

impl From<WpmClient> for LoadTestClient {
    fn from(inner: WpmClient) -> Self {
        Self::from_client(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ListTestsQuery, LoadTestEnvelope, PartType, Region, ScheduleLoadTestRequest, ScriptShare,
        TestPart, WhoAmI,
    };
    use chrono::{Duration, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wpm_core::ids::ScriptId;
    use wpm_core::response::Envelope;
    use wpm_core::Error;

    fn test_client(server: &MockServer) -> LoadTestClient {
        let config = WpmClientConfig::new(server.uri()).unwrap();
        LoadTestClient::new(config, Credentials::new("KEY", "SECRET")).unwrap()
    }

    #[test]
    fn every_path_embeds_the_version() {
        assert_eq!(CATALOG.endpoints.len(), 11);
        assert!(CATALOG
            .endpoints
            .iter()
            .all(|endpoint| endpoint.path.starts_with("{version}/")));
    }

    #[tokio::test]
    async fn echo_message_doubles_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/load/1.0/1.0/echo/TEST_MESSAGE"))
            .respond_with(ResponseTemplate::new(200).set_body_string("TEST_MESSAGE"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let rsp = client.echo_message("TEST_MESSAGE").await.unwrap();
        assert_eq!(rsp.text(), "TEST_MESSAGE");
    }

    #[tokio::test]
    async fn echo_message_rejects_spaces() {
        let server = MockServer::start().await;
        let client = test_client(&server);
        let err = client.echo_message("two words").await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn who_am_i_returns_username() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/load/1.0/1.0/whoami"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"username": "tyler"}})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let who: Envelope<WhoAmI> = client.who_am_i().await.unwrap().json().unwrap();
        assert_eq!(who.data.username, "tyler");
    }

    #[tokio::test]
    async fn list_endpoints_send_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/load/1.0/1.0/list/mostRecent"))
            .and(query_param("limit", "5"))
            .and(query_param("callback", "myFunc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("myFunc({})"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/load/1.0/1.0/list"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"items": []}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = ListTestsQuery {
            limit: Some(5),
            callback: Some("myFunc".into()),
        };
        let rsp = client.get_list_of_tests_as_json(&query).await.unwrap();
        assert_eq!(rsp.text(), "myFunc({})");

        client
            .get_list_of_tests(&ListTestsQuery::with_limit(5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn schedule_then_manage_load_test() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/load/1.0/1.0/schedule"))
            .and(body_partial_json(json!({"region": 0, "overrideCode": ""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"loadTest": {"id": 158_023, "state": "SCHEDULED"}}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/load/1.0/1.0/158023/tag/MY_TAG"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/load/1.0/1.0/158023/tag/MY_TAG"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        for action in ["pause", "resume"] {
            Mock::given(method("PUT"))
                .and(path(format!("/load/1.0/1.0/158023/{action}").as_str()))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/load/1.0/1.0/id/158023"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/load/1.0/1.0/158023/delete"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = ScheduleLoadTestRequest {
            name: "K3J8QZ0A".into(),
            region: Region::UsEast,
            start: Utc::now() + Duration::minutes(900),
            scripts: vec![ScriptShare {
                percentage: 100,
                script_id: ScriptId::new("8839490a355b49ff97188662d354a0dc").unwrap(),
            }],
            override_code: String::new(),
            parts: vec![TestPart {
                duration: 30,
                max_users: 10,
                part_type: PartType::Ramp,
            }],
        };

        let scheduled: Envelope<LoadTestEnvelope> = client
            .schedule_load_test(&request)
            .await
            .unwrap()
            .json()
            .unwrap();
        assert_eq!(scheduled.data.load_test.state.as_deref(), Some("SCHEDULED"));

        let id = scheduled.data.load_test.id;
        client.get_load_test(&id).await.unwrap();
        client.add_tag(&id, "MY_TAG").await.unwrap();
        client.remove_tag(&id, "MY_TAG").await.unwrap();
        client.pause_load_test(&id).await.unwrap();
        client.resume_load_test(&id).await.unwrap();
        client.delete_load_test(&id).await.unwrap();
    }
}
