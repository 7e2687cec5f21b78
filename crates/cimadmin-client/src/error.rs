//! Error types for the CIM-RS client

/// Errors that can occur while talking to the management API
#[derive(Debug, thiserror::Error)]
pub enum CimError {
    #[error("cannot create HTTP client: {0}")]
    Construction(String),

    #[error("invalid server address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CimError {
    /// HTTP status of a non-200 response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body text of a non-200 response
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CimError::Construction("no TLS backend".to_string());
        assert_eq!(err.to_string(), "cannot create HTTP client: no TLS backend");

        let err = CimError::Status {
            status: 500,
            body: "{\"message\":\"bad value\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 500: {\"message\":\"bad value\"}"
        );
    }

    #[test]
    fn test_status_accessors() {
        let err = CimError::Status {
            status: 404,
            body: "missing".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some("missing"));

        let err = CimError::Construction("x".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
    }
}
