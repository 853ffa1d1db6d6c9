//! Asynchronous instant test client implementation.

use crate::Result;
use wpm_core::ids::{validate_id, InstantTestId};
use wpm_core::{
    ApiResponse, Catalog, Credentials, Endpoint, HttpVerb, Payload, Service, ToParams, WpmClient,
    WpmClientConfig,
};

/// Start an instant test job.
pub const CREATE_INSTANT_TEST_JOB: Endpoint = Endpoint::new(
    "createInstantTestJob",
    Service::Tools,
    "instanttest/{version}",
    HttpVerb::Post,
    Payload::Body,
);

/// Results of a job at every location.
pub const GET_INSTANT_TEST_JOB: Endpoint = Endpoint::new(
    "getInstantTestJob",
    Service::Tools,
    "instanttest/{version}/{test_id}",
    HttpVerb::Get,
    Payload::None,
);

/// Results of a job at one location.
pub const GET_INSTANT_TEST_JOB_BY_LOCATION: Endpoint = Endpoint::new(
    "getInstantTestJobByLocation",
    Service::Tools,
    "instanttest/{version}/{test_id}/{location}",
    HttpVerb::Get,
    Payload::None,
);

/// Every instant test endpoint.
pub static CATALOG: Catalog = Catalog {
    service: Service::Tools,
    endpoints: &[
        CREATE_INSTANT_TEST_JOB,
        GET_INSTANT_TEST_JOB,
        GET_INSTANT_TEST_JOB_BY_LOCATION,
    ],
};

/// Asynchronous client for the instant test tool.
#[derive(Debug, Clone)]
pub struct InstantTestClient {
    inner: WpmClient,
}

impl InstantTestClient {
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

    /// Start a job from an [`crate::InstantTestRequest`].
    pub async fn create_instant_test_job<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&CREATE_INSTANT_TEST_JOB, &[], params)
            .await
    }

    /// Results of a job at every location.
    pub async fn get_instant_test_job(&self, test_id: &InstantTestId) -> Result<ApiResponse> {
        self.inner
            .call(&GET_INSTANT_TEST_JOB, &[test_id.as_str()], None)
            .await
    }

    /// Results of a job at `location`.
    pub async fn get_instant_test_job_by_location(
        &self,
        test_id: &InstantTestId,
        location: &str,
    ) -> Result<ApiResponse> {
        validate_id(location)?;
        self.inner
            .call(
                &GET_INSTANT_TEST_JOB_BY_LOCATION,
                &[test_id.as_str(), location],
                None,
            )
            .await
    }
}

impl From<WpmClient> for InstantTestClient {
    fn from(inner: WpmClient) -> Self {
        Self::from_client(inner)
    }
}
