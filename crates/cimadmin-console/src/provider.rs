//! Start/stop for provider module rows.

use cimadmin_client::{
    AdminClient, CimError,
    constants::method,
    model::{MethodRequest, MethodResponse, ProviderModule},
};
use tracing::info;

use crate::edit::MutationOutcome;
use crate::error::{ConsoleError, Result};
use crate::status::{OPERATION_FAILED, Status};
use crate::view::TableView;

pub const PENDING_REQUESTS_MESSAGE: &str = "Module has pending requests and cannot be stopped.";

/// Module is already in the requested state
const ALREADY_DONE: i64 = 1;
const PENDING_REQUESTS: i64 = -2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleAction {
    Start,
    Stop,
}

impl ModuleAction {
    pub fn method(&self) -> &'static str {
        match self {
            ModuleAction::Start => method::START_MODULE,
            ModuleAction::Stop => method::STOP_MODULE,
        }
    }

    /// `0` or `true` means done, `1` means the module was already started or
    /// stopped
    pub fn accepts(&self, response: &MethodResponse) -> bool {
        response.is_success() || response.code() == Some(ALREADY_DONE)
    }
}

/// Indicator for module start/stop requests
#[derive(Debug, Default)]
pub struct ModuleControl {
    status: Status,
}

impl ModuleControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Invoke `action` on the module named `name`, reloading the view on success
    pub async fn run(
        &mut self,
        client: &AdminClient,
        view: &mut TableView<ProviderModule>,
        name: &str,
        action: ModuleAction,
    ) -> Result<MutationOutcome> {
        let reference = view
            .reference(name)
            .ok_or_else(|| ConsoleError::UnknownRow(name.to_string()))?
            .to_string();

        self.status.clear();
        let request = MethodRequest::new(&reference, action.method());
        let outcome = client.invoke_raw(&request).await;

        if self.settle(action, outcome) {
            info!("Provider module {} {:?} succeeded", name, action);
            view.reload(client).await;
            Ok(MutationOutcome::Applied)
        } else {
            Ok(MutationOutcome::Rejected)
        }
    }

    fn settle(
        &mut self,
        action: ModuleAction,
        outcome: std::result::Result<String, CimError>,
    ) -> bool {
        let body = match outcome {
            Ok(body) => body,
            Err(e) => {
                self.status.report(&e);
                return false;
            }
        };

        match serde_json::from_str::<MethodResponse>(&body) {
            Ok(response) if action.accepts(&response) => {
                if response.code() == Some(ALREADY_DONE) {
                    info!("Provider module already in requested state ({:?})", action);
                }
                self.status.success();
                true
            }
            Ok(response)
                if action == ModuleAction::Stop && response.code() == Some(PENDING_REQUESTS) =>
            {
                self.status.failure(PENDING_REQUESTS_MESSAGE, body);
                false
            }
            _ => {
                self.status.failure(OPERATION_FAILED, body);
                false
            }
        }
    }
}

impl TableView<ProviderModule> {
    pub async fn start_module(
        &mut self,
        client: &AdminClient,
        control: &mut ModuleControl,
        name: &str,
    ) -> Result<MutationOutcome> {
        control.run(client, self, name, ModuleAction::Start).await
    }

    pub async fn stop_module(
        &mut self,
        client: &AdminClient,
        control: &mut ModuleControl,
        name: &str,
    ) -> Result<MutationOutcome> {
        control.run(client, self, name, ModuleAction::Stop).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> MethodResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_action_methods() {
        assert_eq!(ModuleAction::Start.method(), "start");
        assert_eq!(ModuleAction::Stop.method(), "stop");
    }

    #[test]
    fn test_accepts_done_and_already_done() {
        for action in [ModuleAction::Start, ModuleAction::Stop] {
            assert!(action.accepts(&response(r#"{"returnvalue":0}"#)));
            assert!(action.accepts(&response(r#"{"returnvalue":1}"#)));
            assert!(action.accepts(&response(r#"{"returnvalue":true}"#)));
            assert!(!action.accepts(&response(r#"{"returnvalue":2}"#)));
            assert!(!action.accepts(&response("{}")));
        }
    }

    #[test]
    fn test_settle_pending_requests_on_stop() {
        let mut control = ModuleControl::new();
        let body = r#"{"returnvalue":-2}"#.to_string();

        assert!(!control.settle(ModuleAction::Stop, Ok(body.clone())));
        assert_eq!(
            control.status().indicator,
            crate::Indicator::Failure {
                message: PENDING_REQUESTS_MESSAGE.to_string(),
                tooltip: body.clone(),
            }
        );

        assert!(!control.settle(ModuleAction::Start, Ok(body)));
        assert!(matches!(
            &control.status().indicator,
            crate::Indicator::Failure { message, .. } if message == OPERATION_FAILED
        ));
    }

    #[test]
    fn test_settle_already_started() {
        let mut control = ModuleControl::new();
        assert!(control.settle(ModuleAction::Start, Ok(r#"{"returnvalue":1}"#.to_string())));
        assert!(control.status().is_success());
    }
}
