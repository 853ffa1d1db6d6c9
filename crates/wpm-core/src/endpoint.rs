//! Static endpoint tables.
//!
//! Each public WPM operation is one [`Endpoint`] row: a service, a method
//! path template, a verb and whether it takes a parameter mapping. Catalog
//! crates declare their rows as constants and group them in a [`Catalog`].
//!
//! Path templates use `{version}` for the configured API version and any
//! other `{name}` placeholder for a caller argument, filled left to right.

use crate::error::{Error, Result};
use crate::params::Params;
use crate::request::RequestSpec;
use crate::service::{HttpVerb, Service};

/// Placeholder expanded to the configured API version.
pub const VERSION_PLACEHOLDER: &str = "version";

/// How an endpoint uses the parameter mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// The endpoint takes no parameters.
    None,
    /// Parameters are required and sent as a GET query string.
    Query,
    /// Parameters are required and sent as a JSON body.
    Body,
}

/// One row of an endpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name
    pub name: &'static str,
    /// Service family
    pub service: Service,
    /// Method path template
    pub path: &'static str,
    /// HTTP verb
    pub verb: HttpVerb,
    /// Parameter requirement
    pub payload: Payload,
}

impl Endpoint {
    /// Declare an endpoint.
    #[must_use]
    pub const fn new(
        name: &'static str,
        service: Service,
        path: &'static str,
        verb: HttpVerb,
        payload: Payload,
    ) -> Self {
        Self {
            name,
            service,
            path,
            verb,
            payload,
        }
    }

    /// Names of the caller-supplied placeholders, in order.
    #[must_use]
    pub fn arguments(&self) -> Vec<&'static str> {
        placeholders(self.path)
            .filter(|name| *name != VERSION_PLACEHOLDER)
            .collect()
    }

    /// Expand the path template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the number of arguments does not
    /// match the template or an argument is empty.
    pub fn render(&self, api_version: &str, args: &[&str]) -> Result<String> {
        let expected = self.arguments();
        if expected.len() != args.len() {
            return Err(Error::InvalidRequest(format!(
                "`{}` expects {} argument(s) ({}), got {}",
                self.name,
                expected.len(),
                expected.join(", "),
                args.len()
            )));
        }

        let mut out = String::with_capacity(self.path.len());
        let mut args = args.iter();
        let mut rest = self.path;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                Error::InternalError(format!("unterminated placeholder in `{}`", self.path))
            })?;
            let name = &after[..close];

            if name == VERSION_PLACEHOLDER {
                out.push_str(api_version);
            } else {
                let value = args.next().copied().unwrap_or_default();
                if value.is_empty() {
                    return Err(Error::InvalidRequest(format!(
                        "`{}` argument `{name}` must not be empty",
                        self.name
                    )));
                }
                out.push_str(value);
            }

            rest = &after[close + 1..];
        }
        out.push_str(rest);

        Ok(out)
    }

    /// Build the request spec for a call to this endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the arguments do not fit the
    /// template, if parameters are given to an endpoint that takes none, or
    /// if a parameter mapping is required but missing. Returns
    /// [`Error::InternalError`] if the payload kind does not suit the verb.
    pub fn request(
        &self,
        api_version: &str,
        args: &[&str],
        params: Option<Params>,
    ) -> Result<RequestSpec> {
        match self.payload {
            Payload::Body if !self.verb.sends_body() => {
                return Err(Error::InternalError(format!(
                    "`{}` sends a body but uses {}",
                    self.name, self.verb
                )));
            }
            Payload::Query if self.verb.sends_body() => {
                return Err(Error::InternalError(format!(
                    "`{}` sends a query string but uses {}",
                    self.name, self.verb
                )));
            }
            _ => {}
        }

        let method = self.render(api_version, args)?;

        let params = match (self.payload, params) {
            (Payload::None, Some(params)) if !params.is_empty() => {
                return Err(Error::InvalidRequest(format!(
                    "`{}` does not take parameters",
                    self.name
                )));
            }
            (Payload::None, _) => Params::new(),
            (Payload::Query | Payload::Body, Some(params)) => params,
            (Payload::Query | Payload::Body, None) => {
                return Err(Error::InvalidRequest(format!(
                    "`{}` requires parameters",
                    self.name
                )));
            }
        };

        Ok(RequestSpec::new(self.service, method, self.verb).with_params(params))
    }
}

fn placeholders(template: &'static str) -> impl Iterator<Item = &'static str> {
    template.split('{').skip(1).filter_map(|piece| piece.split_once('}').map(|(name, _)| name))
}

/// The endpoint table of one service family.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    /// Service family shared by every endpoint
    pub service: Service,
    /// Endpoint rows
    pub endpoints: &'static [Endpoint],
}

impl Catalog {
    /// Look up an endpoint by operation name.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&'static Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }

    /// Operation names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.endpoints.iter().map(|endpoint| endpoint.name)
    }
}
