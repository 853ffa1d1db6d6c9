//! Asynchronous maintenance window client implementation.

use crate::Result;
use wpm_core::ids::MaintenanceWindowId;
use wpm_core::{
    ApiResponse, Catalog, Credentials, Endpoint, HttpVerb, Payload, Service, ToParams, WpmClient,
    WpmClientConfig,
};

const fn maintenance(
    name: &'static str,
    path: &'static str,
    verb: HttpVerb,
    payload: Payload,
) -> Endpoint {
    Endpoint::new(name, Service::Maintenance, path, verb, payload)
}

/// Create a maintenance window.
pub const CREATE_MAINTENANCE_WINDOW: Endpoint = maintenance(
    "createMaintenanceWindow",
    "{version}",
    HttpVerb::Post,
    Payload::Body,
);
/// List maintenance windows.
pub const LIST_MAINTENANCE_WINDOWS: Endpoint = maintenance(
    "listMaintenanceWindows",
    "{version}",
    HttpVerb::Get,
    Payload::None,
);
/// Fetch a maintenance window.
pub const GET_MAINTENANCE_WINDOW: Endpoint = maintenance(
    "getMaintenanceWindow",
    "{version}/{window_id}",
    HttpVerb::Get,
    Payload::None,
);
/// Update a maintenance window.
pub const UPDATE_MAINTENANCE_WINDOW: Endpoint = maintenance(
    "updateMaintenanceWindow",
    "{version}/{window_id}",
    HttpVerb::Put,
    Payload::Body,
);
/// Delete a maintenance window.
pub const DELETE_MAINTENANCE_WINDOW: Endpoint = maintenance(
    "deleteMaintenanceWindow",
    "{version}/{window_id}",
    HttpVerb::Delete,
    Payload::None,
);

/// Every maintenance window endpoint.
pub static CATALOG: Catalog = Catalog {
    service: Service::Maintenance,
    endpoints: &[
        CREATE_MAINTENANCE_WINDOW,
        LIST_MAINTENANCE_WINDOWS,
        GET_MAINTENANCE_WINDOW,
        UPDATE_MAINTENANCE_WINDOW,
        DELETE_MAINTENANCE_WINDOW,
    ],
};

/// Asynchronous client for the `maintenance` service.
#[derive(Debug, Clone)]
pub struct MaintenanceClient {
    inner: WpmClient,
}

impl MaintenanceClient {
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

    /// Create a window from a [`crate::MaintenanceWindowRequest`].
    pub async fn create_maintenance_window<P>(&self, params: &P) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&CREATE_MAINTENANCE_WINDOW, &[], params)
            .await
    }

    /// List windows.
    pub async fn list_maintenance_windows(&self) -> Result<ApiResponse> {
        self.inner.call(&LIST_MAINTENANCE_WINDOWS, &[], None).await
    }

    /// Fetch a window.
    pub async fn get_maintenance_window(&self, window_id: &MaintenanceWindowId) -> Result<ApiResponse> {
        self.inner
            .call(&GET_MAINTENANCE_WINDOW, &[window_id.as_str()], None)
            .await
    }

    /// Update a window.
    pub async fn update_maintenance_window<P>(
        &self,
        window_id: &MaintenanceWindowId,
        params: &P,
    ) -> Result<ApiResponse>
    where
        P: ToParams + ?Sized,
    {
        self.inner
            .call_with(&UPDATE_MAINTENANCE_WINDOW, &[window_id.as_str()], params)
            .await
    }

    /// Delete a window.
    pub async fn delete_maintenance_window(
        &self,
        window_id: &MaintenanceWindowId,
    ) -> Result<ApiResponse> {
        self.inner
            .call(&DELETE_MAINTENANCE_WINDOW, &[window_id.as_str()], None)
            .await
    }
}

impl From<WpmClient> for MaintenanceClient {
    fn from(inner: WpmClient) -> Self {
        Self::from_client(inner)
    }
}
