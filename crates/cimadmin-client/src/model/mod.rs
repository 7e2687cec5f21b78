// Model types for CIM-RS requests and responses

pub mod common;
pub mod config_setting;
pub mod method;
pub mod provider;
pub mod subscription;

pub use common::{Instance, InstanceList, decode_instances};
pub use config_setting::ConfigSetting;
pub use method::{ErrorBody, MethodRequest, MethodResponse, ReturnValue, UpdatePropertyValue};
pub use provider::{ModuleStatus, ProviderModule};
pub use subscription::{IndicationSubscription, SubscriptionState};
