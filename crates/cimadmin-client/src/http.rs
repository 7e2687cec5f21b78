//! HTTP transport for the CIM-RS management API
//!
//! A request resolves to exactly one of two outcomes: `Ok` with the raw body
//! text when the server answers 200, or `Err(CimError::Status)` with the raw
//! body text for any other status. Parsing is left to the caller. There is no
//! retry, and a request cannot be cancelled once it has been sent.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::{AdminClientConfig, Endpoint};
use crate::error::{CimError, Result};

/// HTTP verbs used by the console
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// How the caller waits for a request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestMode {
    /// Spawn the request and hand back its task
    #[default]
    Async,
    /// Wait for the response before returning
    Sync,
}

/// Request/response seam between the views and the network
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a request against the data endpoint
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<String>;

    /// Fetch a static page fragment relative to the page base
    async fn fetch_fragment(&self, name: &str) -> Result<String>;
}

/// reqwest-backed transport
pub struct CimHttpClient {
    client: Client,
    endpoint: Endpoint,
}

impl CimHttpClient {
    /// Create a new HTTP client
    pub fn new(config: &AdminClientConfig) -> Result<Self> {
        let endpoint = Endpoint::from_origin(&config.server_addr, &config.data_path)?;

        let mut builder = Client::builder();
        if config.connect_timeout_ms > 0 {
            builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
        }
        if config.read_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.read_timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| CimError::Construction(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn send(&self, method: Method, url: String, body: Option<&Value>) -> Result<String> {
        debug!("{} {}", method, url);

        let request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => match body {
                Some(body) => self.client.post(&url).json(body),
                None => self.client.post(&url),
            },
        };

        let response = request.send().await?;
        Self::handle_response(method, &url, response).await
    }

    /// Only a 200 counts as success; the body is returned unparsed either way
    async fn handle_response(method: Method, url: &str, response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            Ok(body)
        } else {
            warn!("{} {} failed with status {}", method, url, status);
            Err(CimError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl Transport for CimHttpClient {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<String> {
        let url = self.endpoint.data_url(path);
        self.send(method, url, body).await
    }

    async fn fetch_fragment(&self, name: &str) -> Result<String> {
        let url = self.endpoint.page_url(name);
        self.send(Method::Get, url, None).await
    }
}

/// Outcome of [`dispatch`]
pub enum Dispatched {
    Completed(Result<String>),
    Pending(JoinHandle<Result<String>>),
}

impl Dispatched {
    /// Wait for the outcome, whichever mode it was dispatched in
    pub async fn outcome(self) -> Result<String> {
        match self {
            Dispatched::Completed(result) => result,
            Dispatched::Pending(handle) => handle.await?,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Dispatched::Pending(_))
    }
}

/// Issue a request in the given mode. `Sync` awaits the response in line;
/// `Async` spawns it on the current runtime.
pub async fn dispatch<T>(
    transport: Arc<T>,
    method: Method,
    path: String,
    body: Option<Value>,
    mode: RequestMode,
) -> Dispatched
where
    T: Transport + ?Sized + 'static,
{
    match mode {
        RequestMode::Sync => {
            Dispatched::Completed(transport.request(method, &path, body.as_ref()).await)
        }
        RequestMode::Async => Dispatched::Pending(tokio::spawn(async move {
            transport.request(method, &path, body.as_ref()).await
        })),
    }
}
