//! Asynchronous script client implementation.

use crate::models::Script;
use crate::Result;
use std::path::Path;
use tracing::{debug, info, warn};
use wpm_core::ids::ScriptId;
use wpm_core::response::{Envelope, Items};
use wpm_core::{
    ApiResponse, Catalog, Credentials, Endpoint, Error, HttpVerb, Params, Payload, Service,
    ToParams, WpmClient, WpmClientConfig,
};

/// Parameter carrying the script source.
pub const SCRIPT_BODY_PARAM: &str = "scriptBody";

const fn script(name: &'static str, path: &'static str, verb: HttpVerb, payload: Payload) -> Endpoint {
    Endpoint::new(name, Service::Script, path, verb, payload)
}

/// List every script.
pub const LIST_SCRIPTS: Endpoint = script("listScripts", "script/", HttpVerb::Get, Payload::None);
/// Fetch a script.
pub const GET_SCRIPT: Endpoint =
    script("getScript", "script/{script_id}", HttpVerb::Get, Payload::None);
/// Upload a new script.
pub const UPLOAD_SCRIPT: Endpoint = script("uploadScript", "script", HttpVerb::Post, Payload::Body);
/// Replace a script.
pub const UPDATE_SCRIPT: Endpoint =
    script("updateScript", "script/{script_id}", HttpVerb::Put, Payload::Body);
/// Delete a script.
pub const DELETE_SCRIPT: Endpoint =
    script("deleteScript", "script/{script_id}", HttpVerb::Delete, Payload::None);

/// Every script endpoint.
pub static CATALOG: Catalog = Catalog {
    service: Service::Script,
    endpoints: &[LIST_SCRIPTS, GET_SCRIPT, UPLOAD_SCRIPT, UPDATE_SCRIPT, DELETE_SCRIPT],
};

/// Asynchronous client for the `script` service.
#[derive(Debug, Clone)]
pub struct ScriptClient {
    inner: WpmClient,
}

impl ScriptClient {
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

    /// List every script.
    pub async fn list_scripts(&self) -> Result<ApiResponse> {
        self.inner.call(&LIST_SCRIPTS, &[], None).await
    }

    /// Fetch a script.
    pub async fn get_script(&self, script_id: &ScriptId) -> Result<ApiResponse> {
        self.inner
            .call(&GET_SCRIPT, &[script_id.as_str()], None)
            .await
    }

    /// Upload a script whose source is read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptFile`] without sending anything if the file
    /// cannot be read.
    pub async fn upload_script<P>(&self, params: &P, path: impl AsRef<Path>) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        let mut params = params.to_params()?;
        params.push(SCRIPT_BODY_PARAM, read_script_file(path.as_ref()).await?);
        self.inner.call(&UPLOAD_SCRIPT, &[], Some(params)).await
    }

    /// Replace a script with the source read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptFile`] without sending anything if the file
    /// cannot be read.
    pub async fn update_script<P>(
        &self,
        script_id: &ScriptId,
        params: &P,
        path: impl AsRef<Path>,
    ) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        let mut params = params.to_params()?;
        params.push(SCRIPT_BODY_PARAM, read_script_file(path.as_ref()).await?);
        params.push("id", script_id.as_str());
        self.inner
            .call(&UPDATE_SCRIPT, &[script_id.as_str()], Some(params))
            .await
    }

    /// Delete a script.
    pub async fn delete_script(&self, script_id: &ScriptId) -> Result<ApiResponse> {
        self.inner
            .call(&DELETE_SCRIPT, &[script_id.as_str()], None)
            .await
    }

    /// Delete every script whose name starts with `prefix`.
    ///
    /// Scripts the API refuses to delete are logged and skipped. Returns the
    /// ids that were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an empty prefix, the mapped
    /// status error if the listing fails, or any transport error.
    pub async fn remove_scripts_with_prefix(&self, prefix: &str) -> Result<Vec<ScriptId>> {
        if prefix.is_empty() {
            return Err(Error::InvalidRequest(
                "refusing to remove scripts with an empty prefix".to_string(),
            ));
        }

        let listing: Envelope<Items<Vec<Script>>> =
            self.list_scripts().await?.error_for_status()?.json()?;

        let mut deleted = Vec::new();
        for script in listing.data.items {
            if !script.name.starts_with(prefix) {
                debug!(name = %script.name, "Keeping script");
                continue;
            }

            let rsp = self.delete_script(&script.id).await?;
            if rsp.is_success() {
                info!(id = %script.id, name = %script.name, "Deleted script");
                deleted.push(script.id);
            } else {
                warn!(
                    id = %script.id,
                    status = rsp.status().as_u16(),
                    "Failed to delete script"
                );
            }
        }

        Ok(deleted)
    }
}

impl From<WpmClient> for ScriptClient {
    fn from(inner: WpmClient) -> Self {
        Self::from_client(inner)
    }
}

async fn read_script_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| Error::ScriptFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

/// Script parameters with the body already attached.
///
/// Useful when the source is generated rather than read from disk.
#[must_use]
pub fn with_script_body(params: Params, body: impl Into<String>) -> Params {
    params.with(SCRIPT_BODY_PARAM, body.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScriptEnvelope, ScriptRequest};
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SCRIPT_SOURCE: &str = r#"var webDriver = test.openBrowser();
test.beginTransaction();
test.beginStep("Monitor example.com");
webDriver.get("http://www.example.com");
test.endStep();
test.endTransaction();
"#;

    fn test_client(server: &MockServer) -> ScriptClient {
        let config = WpmClientConfig::new(server.uri()).unwrap();
        ScriptClient::new(config, Credentials::new("KEY", "SECRET")).unwrap()
    }

    fn script_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SCRIPT_SOURCE.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn upload_reads_file_into_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/script/script"))
            .and(body_json(json!({
                "name": "MY TEST SCRIPT",
                "tags": ["api", "testing"],
                "scriptBody": SCRIPT_SOURCE
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"script": {"id": "abc123", "name": "MY TEST SCRIPT"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let file = script_file();
        let request = ScriptRequest {
            tags: vec!["api".into(), "testing".into()],
            ..ScriptRequest::new("MY TEST SCRIPT")
        };

        let uploaded: Envelope<ScriptEnvelope> = client
            .upload_script(&request, file.path())
            .await
            .unwrap()
            .json()
            .unwrap();
        assert_eq!(uploaded.data.script.id.as_str(), "abc123");
    }

    #[tokio::test]
    async fn update_adds_body_and_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/script/script/abc123"))
            .and(body_json(json!({
                "name": "MY TEST SCRIPT",
                "description": "This is my UPDATED test description",
                "scriptBody": SCRIPT_SOURCE,
                "id": "abc123"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let file = script_file();
        let request = ScriptRequest {
            description: Some("This is my UPDATED test description".into()),
            ..ScriptRequest::new("MY TEST SCRIPT")
        };
        let id = ScriptId::new("abc123").unwrap();
        client.update_script(&id, &request, file.path()).await.unwrap();
    }

    #[tokio::test]
    async fn missing_script_file_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("myScript.js");

        let err = client
            .upload_script(&ScriptRequest::new("x"), &missing)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ScriptFile { ref path, .. } if path.ends_with("myScript.js")));
    }

    #[tokio::test]
    async fn get_and_delete_skip_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/script/script/abc123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/script/script/abc123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let id = ScriptId::new("abc123").unwrap();
        client.get_script(&id).await.unwrap();
        client.delete_script(&id).await.unwrap();
    }

    #[tokio::test]
    async fn remove_scripts_with_prefix_deletes_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/script/script/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [
                    {"id": "s1", "name": "script_cs_login"},
                    {"id": "s2", "name": "checkout"},
                    {"id": "s3", "name": "script_cs_search"},
                    {"id": "s4", "name": "script_cs_locked"}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;
        for id in ["s1", "s3"] {
            Mock::given(method("DELETE"))
                .and(path(format!("/script/script/{id}").as_str()))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("DELETE"))
            .and(path("/script/script/s4"))
            .respond_with(ResponseTemplate::new(409).set_body_string("in use"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/script/script/s2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let deleted = client.remove_scripts_with_prefix("script_cs").await.unwrap();
        let deleted: Vec<&str> = deleted.iter().map(ScriptId::as_str).collect();
        assert_eq!(deleted, vec!["s1", "s3"]);
    }

    #[tokio::test]
    async fn remove_scripts_refuses_path_like_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/script/script/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"items": [{"id": "../monitor/x", "name": "script_cs_evil"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(matches!(
            client.remove_scripts_with_prefix("script_cs").await,
            Err(Error::ResponseParse(_))
        ));
    }

    #[tokio::test]
    async fn remove_scripts_rejects_empty_prefix() {
        let server = MockServer::start().await;
        let client = test_client(&server);
        assert!(matches!(
            client.remove_scripts_with_prefix("").await,
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn body_helper_and_catalog() {
        let params = with_script_body(Params::new().with("name", "x"), "test.endStep();");
        assert_eq!(params.get(SCRIPT_BODY_PARAM), Some(&json!("test.endStep();")));
        assert!(CATALOG
            .endpoints
            .iter()
            .all(|endpoint| endpoint.path.starts_with("script")));
    }
}
