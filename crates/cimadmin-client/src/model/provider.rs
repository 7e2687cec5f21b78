// PG_ProviderModule model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::common::scalar_string;

/// One registered provider module
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderModule {
    pub name: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub interface_type: Option<String>,
    #[serde(default, deserialize_with = "status_codes")]
    pub operational_status: Vec<ModuleStatus>,
}

/// CIM_ManagedSystemElement.OperationalStatus values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum ModuleStatus {
    Unknown,
    Other,
    Ok,
    Degraded,
    Stressed,
    PredictiveFailure,
    Error,
    NonRecoverableError,
    Starting,
    Stopping,
    Stopped,
    InService,
    NoContact,
    LostCommunication,
    NotSupported(u16),
}

impl From<u16> for ModuleStatus {
    fn from(code: u16) -> Self {
        match code {
            0 => Self::Unknown,
            1 => Self::Other,
            2 => Self::Ok,
            3 => Self::Degraded,
            4 => Self::Stressed,
            5 => Self::PredictiveFailure,
            6 => Self::Error,
            7 => Self::NonRecoverableError,
            8 => Self::Starting,
            9 => Self::Stopping,
            10 => Self::Stopped,
            11 => Self::InService,
            12 => Self::NoContact,
            13 => Self::LostCommunication,
            other => Self::NotSupported(other),
        }
    }
}

impl From<ModuleStatus> for u16 {
    fn from(status: ModuleStatus) -> Self {
        match status {
            ModuleStatus::Unknown => 0,
            ModuleStatus::Other => 1,
            ModuleStatus::Ok => 2,
            ModuleStatus::Degraded => 3,
            ModuleStatus::Stressed => 4,
            ModuleStatus::PredictiveFailure => 5,
            ModuleStatus::Error => 6,
            ModuleStatus::NonRecoverableError => 7,
            ModuleStatus::Starting => 8,
            ModuleStatus::Stopping => 9,
            ModuleStatus::Stopped => 10,
            ModuleStatus::InService => 11,
            ModuleStatus::NoContact => 12,
            ModuleStatus::LostCommunication => 13,
            ModuleStatus::NotSupported(code) => code,
        }
    }
}

impl ModuleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Other => "Other",
            Self::Ok => "OK",
            Self::Degraded => "Degraded",
            Self::Stressed => "Stressed",
            Self::PredictiveFailure => "Predictive Failure",
            Self::Error => "Error",
            Self::NonRecoverableError => "Non-Recoverable Error",
            Self::Starting => "Starting",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
            Self::InService => "In Service",
            Self::NoContact => "No Contact",
            Self::LostCommunication => "Lost Communication",
            Self::NotSupported(_) => "Not Supported",
        }
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// OperationalStatus arrives as an array, a single code, or numeric strings
fn status_codes<'de, D>(deserializer: D) -> Result<Vec<ModuleStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    fn code<E: serde::de::Error>(value: &Value) -> Result<ModuleStatus, E> {
        let parsed = match value {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u16>().ok(),
            _ => None,
        };
        parsed
            .map(ModuleStatus::from)
            .ok_or_else(|| E::custom(format!("invalid status code {value}")))
    }

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(code).collect(),
        Some(single) => Ok(vec![code(&single)?]),
    }
}
