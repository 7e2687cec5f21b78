// AdminClient - facade for the management operations used by the console

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::AdminClientConfig,
    constants::{cimrs_path, method},
    error::Result,
    http::{CimHttpClient, Method, Transport},
    model::{
        ConfigSetting, IndicationSubscription, Instance, MethodRequest, MethodResponse,
        ProviderModule, UpdatePropertyValue, decode_instances,
    },
};

/// Admin client for the CIM-RS management API
#[derive(Clone)]
pub struct AdminClient {
    transport: Arc<dyn Transport>,
}

impl AdminClient {
    /// Create a new AdminClient backed by reqwest
    pub fn new(config: &AdminClientConfig) -> Result<Self> {
        let http_client = CimHttpClient::new(config)?;
        Ok(Self {
            transport: Arc::new(http_client),
        })
    }

    /// Create a new AdminClient from a single server origin
    pub fn from_server_addr(addr: &str) -> Result<Self> {
        Self::new(&AdminClientConfig::new(addr))
    }

    /// Create an AdminClient over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    // ============================================================================
    // Listing APIs
    // ============================================================================

    /// GET a class enumeration path and return the raw body
    pub async fn list_raw(&self, path: &str) -> Result<String> {
        self.transport.request(Method::Get, path, None).await
    }

    pub async fn list<P: DeserializeOwned>(&self, path: &str) -> Result<Vec<Instance<P>>> {
        let body = self.list_raw(path).await?;
        decode_instances(&body)
    }

    pub async fn config_settings(&self) -> Result<Vec<Instance<ConfigSetting>>> {
        self.list(cimrs_path::CONFIG_SETTING_INSTANCES).await
    }

    pub async fn provider_modules(&self) -> Result<Vec<Instance<ProviderModule>>> {
        self.list(cimrs_path::PROVIDER_MODULE_INSTANCES).await
    }

    pub async fn subscriptions(&self) -> Result<Vec<Instance<IndicationSubscription>>> {
        self.list(cimrs_path::SUBSCRIPTION_INSTANCES).await
    }

    // ============================================================================
    // Method invocation APIs
    // ============================================================================

    /// POST a method request and return the raw body
    pub async fn invoke_raw(&self, request: &MethodRequest) -> Result<String> {
        let path = request.path();
        debug!("Invoking {} on {}", request.method, request.reference);

        let body = serde_json::to_value(request)?;
        self.transport.request(Method::Post, &path, Some(&body)).await
    }

    pub async fn invoke(&self, request: &MethodRequest) -> Result<MethodResponse> {
        let body = self.invoke_raw(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn update_property_value(
        &self,
        reference: &str,
        update: UpdatePropertyValue,
    ) -> Result<MethodResponse> {
        self.invoke(&update.into_request(reference)).await
    }

    pub async fn start_module(&self, reference: &str) -> Result<MethodResponse> {
        self.invoke(&MethodRequest::new(reference, method::START_MODULE))
            .await
    }

    pub async fn stop_module(&self, reference: &str) -> Result<MethodResponse> {
        self.invoke(&MethodRequest::new(reference, method::STOP_MODULE))
            .await
    }

    // ============================================================================
    // Page fragments
    // ============================================================================

    pub async fn fetch_fragment(&self, name: &str) -> Result<String> {
        self.transport.fetch_fragment(name).await
    }
}
