//! Request dispatcher and HTTP client construction.
//!
//! [`WpmClient`] holds the credentials, the API base URL and version, and a
//! shared transport. Each call takes a [`RequestSpec`] value, signs it at the
//! current second, builds the URL and issues exactly one request.

use reqwest::ClientBuilder;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::config::WpmClientConfig;
use crate::credentials::Credentials;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::params::{Params, ToParams};
use crate::request::{parse_request_url, request_url, ParsedRequestUrl, RequestSpec};
use crate::response::ApiResponse;
use crate::service::HttpVerb;
use crate::sign;
use crate::transport::{HttpTransport, ReqwestTransport};

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

const USER_AGENT: &str = concat!("wpm-core/", env!("CARGO_PKG_VERSION"));

/// HTTP connection pool configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
        }
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`WpmClient`].
pub struct WpmClientBuilder {
    config: WpmClientConfig,
    credentials: Credentials,
    http_config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl WpmClientBuilder {
    /// Create a builder from a configuration and credentials.
    #[must_use]
    pub fn new(config: WpmClientConfig, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
            http_config: ClientConfig::new(),
            transport: None,
        }
    }

    /// Override the HTTP pool configuration.
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Use a custom transport instead of building a reqwest client.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Finalise the builder and create the [`WpmClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<WpmClient> {
        validator::Validate::validate(&self.config)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        self.config.parse_api_base_url()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(build_http_client(
                &self.config,
                &self.http_config,
            )?)),
        };

        Ok(WpmClient {
            transport,
            credentials: self.credentials,
            api_base_url: self.config.api_base_url,
            api_version: self.config.api_version,
        })
    }
}

fn build_http_client(config: &WpmClientConfig, http_config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = ClientBuilder::new()
        .user_agent(config.user_agent.as_deref().unwrap_or(USER_AGENT))
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .pool_idle_timeout(http_config.pool_idle_timeout)
        .pool_max_idle_per_host(http_config.pool_max_idle_per_host);

    if !http_config.enable_compression {
        builder = builder.no_gzip();
    }

    if !config.tls_verify {
        warn!("TLS verification disabled for WPM client");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|err| Error::ConfigError(format!("Failed to build WPM HTTP client: {err}")))
}

/// Signs and dispatches WPM API requests.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct WpmClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Credentials,
    api_base_url: String,
    api_version: String,
}

impl WpmClient {
    /// Construct a client with the default HTTP stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: WpmClientConfig, credentials: Credentials) -> Result<Self> {
        WpmClientBuilder::new(config, credentials).build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder(config: WpmClientConfig, credentials: Credentials) -> WpmClientBuilder {
        WpmClientBuilder::new(config, credentials)
    }

    /// The API key sent with each request.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Base URL every service path is appended to.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// API version segment.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Replace the credentials used for subsequent calls.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// Signature for the current second.
    #[must_use]
    pub fn signature(&self) -> String {
        self.credentials.sign_at(sign::current_timestamp())
    }

    /// Build the URL for `spec` signed at `timestamp` (Unix seconds).
    #[must_use]
    pub fn signed_url(&self, spec: &RequestSpec, timestamp: i64) -> String {
        let signature = self.credentials.sign_at(timestamp);
        request_url(
            &self.api_base_url,
            &self.api_version,
            spec,
            self.credentials.api_key(),
            &signature,
        )
    }

    /// Recover service, method, key and signature from a URL this client built.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL was not built against this client's base
    /// and version.
    pub fn parse_url(&self, url: &str) -> Result<ParsedRequestUrl> {
        parse_request_url(&self.api_base_url, &self.api_version, url)
    }

    /// Sign and send one request.
    ///
    /// HTTP error statuses come back as `Ok`; only transport failures are
    /// `Err`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if no response was received.
    pub async fn dispatch(&self, spec: &RequestSpec) -> Result<ApiResponse> {
        let url = self.signed_url(spec, sign::current_timestamp());

        debug!(
            service = %spec.service,
            method = %spec.method,
            verb = %spec.verb,
            params = spec.params.len(),
            "Sending WPM request"
        );
        trace!(%url, "Signed WPM request URL");

        match spec.verb {
            HttpVerb::Get => self.transport.get(&url).await,
            HttpVerb::Post => self.transport.post(&url, &spec.params).await,
            HttpVerb::Put => self.transport.put(&url, &spec.params).await,
            HttpVerb::Delete => self.transport.delete(&url).await,
        }
    }

    /// Call a table endpoint with path arguments and optional parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the arguments or parameters do not
    /// fit the endpoint, or a transport error.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        params: Option<Params>,
    ) -> Result<ApiResponse> {
        let spec = endpoint.request(&self.api_version, args, params)?;
        self.dispatch(&spec).await
    }

    /// Call a table endpoint with a typed parameter model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be converted, or any error from
    /// [`WpmClient::call`].
    pub async fn call_with<P>(&self, endpoint: &Endpoint, args: &[&str], params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        let params = params.to_params()?;
        self.call(endpoint, args, Some(params)).await
    }

    /// Send a request described by loosely typed strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] without sending anything if `verb` is
    /// not GET, POST, PUT or DELETE, [`Error::InvalidRequest`] for an unknown
    /// service, or a transport error.
    pub async fn call_raw(
        &self,
        service: &str,
        method: &str,
        verb: &str,
        params: Params,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::parse(service, method, verb)
            .map_err(|err| {
                warn!(service, method, verb, "Rejected WPM request: {err}");
                err
            })?
            .with_params(params);
        self.dispatch(&spec).await
    }
}

impl fmt::Debug for WpmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WpmClient")
            .field("credentials", &self.credentials)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for WpmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[WpmClient: {}, {}, {}]",
            self.credentials.api_key(),
            self.api_base_url,
            self.api_version
        )
    }
}
