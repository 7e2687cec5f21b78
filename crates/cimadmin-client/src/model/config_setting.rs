// PG_ConfigSetting model

use serde::{Deserialize, Serialize};

use super::common::{lenient_bool, scalar_string};

/// One server configuration property
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigSetting {
    pub property_name: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub current_value: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub default_value: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub planned_value: Option<String>,
    /// Whether the current value can change without a server restart
    #[serde(default, deserialize_with = "lenient_bool")]
    pub dynamic_property: bool,
}
