//! Status indicator shown next to a table or in the edit overlay.

use cimadmin_client::{
    CimError,
    model::{ErrorBody, MethodResponse},
};

pub const CHECK_ONE_MESSAGE: &str = "Please check at least one checkbox.";
pub const OPERATION_FAILED: &str = "Operation failed.";
pub const MALFORMED_RESPONSE: &str = "Malformed response.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Indicator {
    #[default]
    None,
    Success {
        tooltip: String,
    },
    Failure {
        message: String,
        tooltip: String,
    },
    /// Blocking alert, the request never left
    Alert(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub indicator: Indicator,
    /// Inline message, e.g. a validation error
    pub text: String,
}

impl Status {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn success(&mut self) {
        self.indicator = Indicator::Success {
            tooltip: String::new(),
        };
        self.text.clear();
    }

    pub fn failure(&mut self, message: impl Into<String>, tooltip: impl Into<String>) {
        self.indicator = Indicator::Failure {
            message: message.into(),
            tooltip: tooltip.into(),
        };
    }

    pub fn validation(&mut self, message: impl Into<String>) {
        self.indicator = Indicator::None;
        self.text = message.into();
    }

    /// Route a client error to the indicator. Error bodies with a `message`
    /// show it with `details` as the tooltip; anything else shows a generic
    /// message with the raw body.
    pub fn report(&mut self, error: &CimError) {
        match error {
            CimError::Construction(reason) => {
                self.indicator = Indicator::Alert(reason.clone());
            }
            CimError::Status { body, .. } => {
                let parsed = ErrorBody::parse(body);
                if parsed.message.is_empty() {
                    self.failure(OPERATION_FAILED, body.clone());
                } else {
                    self.failure(parsed.message, parsed.details);
                }
            }
            other => self.failure(OPERATION_FAILED, other.to_string()),
        }
    }

    /// Settle a method invocation outcome. Returns true when the server
    /// reported success.
    pub fn settle(&mut self, outcome: Result<String, CimError>) -> bool {
        match outcome {
            Ok(body) => match serde_json::from_str::<MethodResponse>(&body) {
                Ok(response) if response.is_success() => {
                    self.success();
                    true
                }
                _ => {
                    self.failure(OPERATION_FAILED, body);
                    false
                }
            },
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.indicator, Indicator::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.indicator, Indicator::Failure { .. })
    }

    /// Tooltip of the current indicator
    pub fn tooltip(&self) -> Option<&str> {
        match &self.indicator {
            Indicator::Success { tooltip } | Indicator::Failure { tooltip, .. } => {
                Some(tooltip.as_str())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.indicator {
            Indicator::None => f.write_str(&self.text),
            Indicator::Success { .. } => f.write_str("OK"),
            Indicator::Failure { message, tooltip } if tooltip.is_empty() => {
                write!(f, "FAILED: {}", message)
            }
            Indicator::Failure { message, tooltip } => {
                write!(f, "FAILED: {} ({})", message, tooltip)
            }
            Indicator::Alert(reason) => write!(f, "ALERT: {}", reason),
        }
    }
}
