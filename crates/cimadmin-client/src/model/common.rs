// Instance listing envelope and lenient scalar decoding

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::Result;

/// Body of a class enumeration response
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InstanceList<P> {
    #[serde(default = "Vec::new")]
    pub instances: Vec<Instance<P>>,
}

/// One enumerated instance
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Instance<P> {
    /// Server-assigned reference of the instance
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub properties: P,
}

/// Parse a listing body into typed instances
pub fn decode_instances<P: DeserializeOwned>(body: &str) -> Result<Vec<Instance<P>>> {
    let list: InstanceList<P> = serde_json::from_str(body)?;
    Ok(list.instances)
}

/// Accepts a string, number or boolean and keeps its textual form
pub(crate) fn scalar_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Accepts `true`/`false` as JSON booleans or strings
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("expected boolean, got {s:?}"))),
        },
        Some(other) => Err(serde::de::Error::custom(format!("expected boolean, got {other}"))),
    }
}
