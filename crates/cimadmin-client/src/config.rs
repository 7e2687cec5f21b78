// Configuration for AdminClient

use url::Url;

use crate::constants::{DEFAULT_DATA_PATH, DEFAULT_SERVER_ADDR};
use crate::error::{CimError, Result};

/// Configuration for the admin HTTP client
#[derive(Clone, Debug)]
pub struct AdminClientConfig {
    /// Server origin (e.g. "http://127.0.0.1:5988")
    pub server_addr: String,
    /// Connection timeout in milliseconds, 0 disables it (default: 0)
    pub connect_timeout_ms: u64,
    /// Whole-request timeout in milliseconds, 0 disables it (default: 0)
    pub read_timeout_ms: u64,
    /// Path segment of the data endpoint (default: "cimrs")
    pub data_path: String,
}

impl Default for AdminClientConfig {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            connect_timeout_ms: 0,
            read_timeout_ms: 0,
            data_path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

impl AdminClientConfig {
    /// Create a new config for a single server origin
    pub fn new(server_addr: &str) -> Self {
        Self {
            server_addr: server_addr.to_string(),
            ..Default::default()
        }
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Set the data endpoint path
    pub fn with_data_path(mut self, path: &str) -> Self {
        self.data_path = path.to_string();
        self
    }
}

/// Base URLs derived from the server origin.
///
/// `page_base` is `<scheme>://<host>:<port>/` and serves static page
/// fragments; `data_base` appends the data path (`cimrs/`) and serves every
/// management request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    page_base: String,
    data_base: String,
}

impl Endpoint {
    pub fn from_origin(origin: &str, data_path: &str) -> Result<Self> {
        let invalid = |reason: &str| CimError::InvalidAddress {
            addr: origin.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(origin).map_err(|e| invalid(&e.to_string()))?;
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("missing port"))?;

        let page_base = format!("{}://{}:{}/", url.scheme(), host, port);
        let data_path = data_path.trim_matches('/');
        let data_base = if data_path.is_empty() {
            page_base.clone()
        } else {
            format!("{}{}/", page_base, data_path)
        };

        Ok(Self {
            page_base,
            data_base,
        })
    }

    pub fn page_base(&self) -> &str {
        &self.page_base
    }

    pub fn data_base(&self) -> &str {
        &self.data_base
    }

    /// Resolve a data path. Absolute URLs pass through and origin-absolute
    /// paths (leading `/`) resolve against the page base.
    pub fn data_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if let Some(stripped) = path.strip_prefix('/') {
            format!("{}{}", self.page_base, stripped)
        } else {
            format!("{}{}", self.data_base, path)
        }
    }

    pub fn page_url(&self, name: &str) -> String {
        format!("{}{}", self.page_base, name.trim_start_matches('/'))
    }
}
