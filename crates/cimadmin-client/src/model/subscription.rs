// Indication subscription model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::common::scalar_string;

/// One indication subscription (filter + handler pair)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndicationSubscription {
    pub subscription_info: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub handler: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub filter: Option<String>,
    #[serde(default)]
    pub subscription_state: SubscriptionState,
}

/// CIM_IndicationSubscription.SubscriptionState
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "u16")]
pub enum SubscriptionState {
    #[default]
    Unknown,
    Other,
    Enabled,
    EnabledDegraded,
    Disabled,
    NotSupported(u16),
}

impl From<u16> for SubscriptionState {
    fn from(code: u16) -> Self {
        match code {
            0 => Self::Unknown,
            1 => Self::Other,
            2 => Self::Enabled,
            3 => Self::EnabledDegraded,
            4 => Self::Disabled,
            other => Self::NotSupported(other),
        }
    }
}

impl From<SubscriptionState> for u16 {
    fn from(state: SubscriptionState) -> Self {
        match state {
            SubscriptionState::Unknown => 0,
            SubscriptionState::Other => 1,
            SubscriptionState::Enabled => 2,
            SubscriptionState::EnabledDegraded => 3,
            SubscriptionState::Disabled => 4,
            SubscriptionState::NotSupported(code) => code,
        }
    }
}

impl SubscriptionState {
    /// Other is reported as Unknown, as the command-line tools do
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown | Self::Other => "Unknown",
            Self::Enabled => "Enabled",
            Self::EnabledDegraded => "Enabled Degraded",
            Self::Disabled => "Disabled",
            Self::NotSupported(_) => "Not Supported",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "other" => Some(Self::Other),
            "enabled" => Some(Self::Enabled),
            "enabled degraded" | "enableddegraded" => Some(Self::EnabledDegraded),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SubscriptionState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(Self::Unknown),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .map(Self::from)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid state code {n}"))),
            Some(Value::String(s)) => match s.trim().parse::<u16>() {
                Ok(code) => Ok(Self::from(code)),
                Err(_) => Self::from_label(&s)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid state {s:?}"))),
            },
            Some(other) => Err(serde::de::Error::custom(format!("invalid state {other}"))),
        }
    }
}
