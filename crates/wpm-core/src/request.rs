//! Request specs and signed request URLs.
//!
//! A request URL has the shape
//! `<base>/<service>[/<version>]/<method>?apikey=<key>&sig=<sig>[&k=v...]`.
//! The version segment is left out when the method starts with `script`, and
//! GET parameters are appended unencoded in insertion order.

use crate::error::{Error, Result};
use crate::params::Params;
use crate::service::{HttpVerb, Service};

/// Method prefix that suppresses the version segment.
pub const UNVERSIONED_METHOD_PREFIX: &str = "script";

/// A fully described API call: where it goes, how, and with what parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Service family
    pub service: Service,
    /// Endpoint-relative method path, possibly empty
    pub method: String,
    /// HTTP verb
    pub verb: HttpVerb,
    /// Query parameters (GET) or JSON body (POST/PUT)
    pub params: Params,
}

impl RequestSpec {
    /// Create a spec with no parameters.
    #[must_use]
    pub fn new(service: Service, method: impl Into<String>, verb: HttpVerb) -> Self {
        Self {
            service,
            method: method.into(),
            verb,
            params: Params::new(),
        }
    }

    /// Create a spec from loosely typed strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] for a verb other than GET, POST, PUT
    /// or DELETE and [`Error::InvalidRequest`] for an unknown service.
    pub fn parse(service: &str, method: impl Into<String>, verb: &str) -> Result<Self> {
        let verb = verb.parse::<HttpVerb>()?;
        let service = service.parse::<Service>()?;
        Ok(Self::new(service, method, verb))
    }

    /// Attach parameters.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Whether the version segment is added to the path.
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        !self.method.starts_with(UNVERSIONED_METHOD_PREFIX)
    }
}

/// Build the request URL for `spec`.
///
/// `api_base` may or may not end with `/`; the separator is not doubled.
#[must_use]
pub fn request_url(
    api_base: &str,
    api_version: &str,
    spec: &RequestSpec,
    api_key: &str,
    signature: &str,
) -> String {
    let mut url = String::from(api_base.trim_end_matches('/'));
    url.push('/');
    url.push_str(spec.service.name());

    if spec.is_versioned() {
        url.push('/');
        url.push_str(api_version);
    }

    if !spec.method.is_empty() {
        url.push('/');
        url.push_str(&spec.method);
    }

    url.push_str("?apikey=");
    url.push_str(api_key);
    url.push_str("&sig=");
    url.push_str(signature);

    if spec.verb == HttpVerb::Get && !spec.params.is_empty() {
        url.push_str(&spec.params.to_query_suffix());
    }

    url
}

/// Components recovered from a request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequestUrl {
    /// Service family
    pub service: Service,
    /// Method path, empty if the URL had none
    pub method: String,
    /// API key query value
    pub api_key: String,
    /// Signature query value
    pub signature: String,
}

/// Recover (service, method, key, signature) from a URL produced by
/// [`request_url`] against the same base and version.
///
/// # Errors
///
/// Returns [`Error::InvalidEndpoint`] if the URL does not belong to the base,
/// lacks the version segment where one is required, or lacks the `apikey` or
/// `sig` query values.
pub fn parse_request_url(api_base: &str, api_version: &str, url: &str) -> Result<ParsedRequestUrl> {
    let base = format!("{}/", api_base.trim_end_matches('/'));
    let rest = url
        .strip_prefix(&base)
        .ok_or_else(|| Error::InvalidEndpoint(format!("`{url}` is not under `{base}`")))?;

    let (path, query) = rest
        .split_once('?')
        .ok_or_else(|| Error::InvalidEndpoint(format!("`{url}` has no query string")))?;

    let (service, remainder) = path.split_once('/').unwrap_or((path, ""));
    let service = service.parse::<Service>()?;

    let method = if remainder.starts_with(UNVERSIONED_METHOD_PREFIX) {
        remainder.to_string()
    } else if remainder == api_version {
        String::new()
    } else {
        remainder
            .strip_prefix(api_version)
            .and_then(|m| m.strip_prefix('/'))
            .ok_or_else(|| {
                Error::InvalidEndpoint(format!("`{url}` is missing version `{api_version}`"))
            })?
            .to_string()
    };

    let mut api_key = None;
    let mut signature = None;
    // values are written unencoded, so they are read back verbatim
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("apikey", value)) if api_key.is_none() => api_key = Some(value.to_string()),
            Some(("sig", value)) if signature.is_none() => signature = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(ParsedRequestUrl {
        service,
        method,
        api_key: api_key
            .ok_or_else(|| Error::InvalidEndpoint(format!("`{url}` has no apikey")))?,
        signature: signature
            .ok_or_else(|| Error::InvalidEndpoint(format!("`{url}` has no sig")))?,
    })
}
