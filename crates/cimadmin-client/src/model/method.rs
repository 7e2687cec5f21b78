// Method invocation payloads and responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::method;

/// Body POSTed to `<reference>/<method>`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodRequest {
    pub kind: String,
    #[serde(rename = "self")]
    pub reference: String,
    pub method: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl MethodRequest {
    pub fn new(reference: &str, method_name: &str) -> Self {
        Self {
            kind: method::REQUEST_KIND.to_string(),
            reference: reference.to_string(),
            method: method_name.to_string(),
            parameters: Map::new(),
        }
    }

    pub fn with_parameter(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }

    /// Path the request is POSTed to, relative to the data base
    pub fn path(&self) -> String {
        format!("{}/{}", self.reference.trim_end_matches('/'), self.method)
    }
}

/// Parameters of `UpdatePropertyValue`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdatePropertyValue {
    /// New value; `None` for a reset
    pub value: Option<String>,
    pub reset: bool,
    pub set_current: bool,
    pub set_planned: bool,
}

impl UpdatePropertyValue {
    pub fn set(value: &str, set_current: bool, set_planned: bool) -> Self {
        Self {
            value: Some(value.to_string()),
            reset: false,
            set_current,
            set_planned,
        }
    }

    pub fn reset(set_current: bool, set_planned: bool) -> Self {
        Self {
            value: None,
            reset: true,
            set_current,
            set_planned,
        }
    }

    pub fn into_request(self, reference: &str) -> MethodRequest {
        let mut request = MethodRequest::new(reference, method::UPDATE_PROPERTY_VALUE);
        if let Some(value) = self.value {
            request = request.with_parameter(method::PARAM_PROPERTY_VALUE, value);
        }
        request
            .with_parameter(method::PARAM_RESET_VALUE, self.reset)
            .with_parameter(method::PARAM_SET_CURRENT_VALUE, self.set_current)
            .with_parameter(method::PARAM_SET_PLANNED_VALUE, self.set_planned)
    }
}

/// Method return value; providers answer with a boolean or a status code
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnValue {
    Bool(bool),
    Code(i64),
    Text(String),
}

impl ReturnValue {
    /// `true` and `0` mean success
    pub fn is_success(&self) -> bool {
        match self {
            ReturnValue::Bool(b) => *b,
            ReturnValue::Code(code) => *code == 0,
            ReturnValue::Text(text) => text.eq_ignore_ascii_case("true") || text == "0",
        }
    }

    /// Numeric form of the value, when it has one
    pub fn code(&self) -> Option<i64> {
        match self {
            ReturnValue::Code(code) => Some(*code),
            ReturnValue::Text(text) => text.trim().parse().ok(),
            ReturnValue::Bool(_) => None,
        }
    }
}

/// Body of a 200 method response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodResponse {
    #[serde(default)]
    pub returnvalue: Option<ReturnValue>,
}

impl MethodResponse {
    pub fn is_success(&self) -> bool {
        self.returnvalue.as_ref().is_some_and(ReturnValue::is_success)
    }

    pub fn code(&self) -> Option<i64> {
        self.returnvalue.as_ref().and_then(ReturnValue::code)
    }
}

/// Body of a non-200 response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: String,
}

impl ErrorBody {
    /// Parse an error body; anything unparseable yields an empty message
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}
