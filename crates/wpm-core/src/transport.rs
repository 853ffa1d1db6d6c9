//! HTTP transport seam.
//!
//! The dispatcher only needs four verbs. [`ReqwestTransport`] is the
//! production implementation; tests substitute a mock or a local server.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder};
use tracing::warn;

use crate::error::{Error, Result};
use crate::params::Params;
use crate::response::ApiResponse;

/// Minimal HTTP capability set used by [`crate::WpmClient`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET with no body.
    async fn get(&self, url: &str) -> Result<ApiResponse>;

    /// Issue a POST with `body` encoded as JSON.
    async fn post(&self, url: &str, body: &Params) -> Result<ApiResponse>;

    /// Issue a PUT with `body` encoded as JSON.
    async fn put(&self, url: &str, body: &Params) -> Result<ApiResponse>;

    /// Issue a DELETE with no body.
    async fn delete(&self, url: &str) -> Result<ApiResponse>;
}

/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Wrap an existing client.
    #[must_use]
    pub const fn new(http: Client) -> Self {
        Self { http }
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|err| {
                let error = Error::from(err);
                warn!(code = error.error_code(), "WPM request failed: {error}");
                error
            })?;

        ApiResponse::from_reqwest(response).await
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<ApiResponse> {
        self.send(self.http.get(url)).await
    }

    async fn post(&self, url: &str, body: &Params) -> Result<ApiResponse> {
        self.send(self.http.post(url).json(body)).await
    }

    async fn put(&self, url: &str, body: &Params) -> Result<ApiResponse> {
        self.send(self.http.put(url).json(body)).await
    }

    async fn delete(&self, url: &str) -> Result<ApiResponse> {
        self.send(self.http.delete(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_returns_raw_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/monitor/1.0/locations"))
            .and(query_param("apikey", "k"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Client::new());
        let url = format!("{}/monitor/1.0/locations?apikey=k&sig=s", server.uri());
        let rsp = transport.get(&url).await.unwrap();
        assert!(rsp.is_success());
        assert_eq!(rsp.text(), r#"{"data":{}}"#);
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/monitor/1.0"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "svc", "interval": 60})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Client::new());
        let body = Params::new().with("name", "svc").with("interval", 60);
        let url = format!("{}/monitor/1.0?apikey=k&sig=s", server.uri());
        let rsp = transport.post(&url, &body).await.unwrap();
        assert_eq!(rsp.status().as_u16(), 201);
    }

    #[tokio::test]
    async fn error_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Client::new());
        let url = format!("{}/monitor/1.0/abc?apikey=k&sig=s", server.uri());
        let rsp = transport.delete(&url).await.unwrap();
        assert_eq!(rsp.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error() {
        let transport = ReqwestTransport::new(Client::new());
        let err = transport
            .get("http://127.0.0.1:1/monitor/1.0?apikey=k&sig=s")
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
