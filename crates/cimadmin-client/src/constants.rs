// CIM-RS resource paths and method names used by the admin console

pub const DEFAULT_SERVER_ADDR: &str = "http://127.0.0.1:5988";
pub const DEFAULT_DATA_PATH: &str = "cimrs";

pub mod cimrs_path {
    // Class enumeration paths, relative to the data base URL
    pub const CONFIG_SETTING_INSTANCES: &str =
        "root%2FPG_Config/classes/PG_ConfigSetting/instances";
    pub const PROVIDER_MODULE_INSTANCES: &str =
        "root%2FPG_InterOp/classes/PG_ProviderModule/instances";
    pub const SUBSCRIPTION_INSTANCES: &str =
        "root%2FPG_InterOp/classes/PG_ListSubscriptions/instances";
}

pub mod method {
    pub const REQUEST_KIND: &str = "methodrequest";

    pub const UPDATE_PROPERTY_VALUE: &str = "UpdatePropertyValue";
    pub const START_MODULE: &str = "start";
    pub const STOP_MODULE: &str = "stop";

    // UpdatePropertyValue parameters
    pub const PARAM_PROPERTY_VALUE: &str = "PropertyValue";
    pub const PARAM_RESET_VALUE: &str = "resetvalue";
    pub const PARAM_SET_CURRENT_VALUE: &str = "setcurrentvalue";
    pub const PARAM_SET_PLANNED_VALUE: &str = "setPlannedValue";
}
