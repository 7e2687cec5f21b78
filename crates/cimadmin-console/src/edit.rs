//! Edit/reset overlay for config settings.
//!
//! ```text
//! Idle ──open_edit──▶ Editing ───submit──▶ Submitting ──success──▶ Idle
//! Idle ──open_reset─▶ Resetting ─submit──▶ Submitting ──failure──▶ Editing/Resetting
//! ```
//!
//! Every open bumps the session generation. A completion carrying an older
//! generation is superseded: it neither touches the indicator nor reloads.

use cimadmin_client::{
    AdminClient, CimError,
    model::{ConfigSetting, MethodRequest, UpdatePropertyValue},
};
use tracing::{debug, info};

use crate::error::{ConsoleError, Result};
use crate::kind::decode;
use crate::status::{CHECK_ONE_MESSAGE, Status};
use crate::view::TableView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    Edit,
    Reset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Idle,
    Editing,
    Resetting,
    Submitting,
}

/// Value editor: free text, or a selector when the value is a boolean
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorValue {
    Text(String),
    Bool(bool),
}

impl EditorValue {
    pub fn from_displayed(value: &str) -> Self {
        match value {
            "true" => EditorValue::Bool(true),
            "false" => EditorValue::Bool(false),
            other => EditorValue::Text(other.to_string()),
        }
    }

    pub fn as_param(&self) -> String {
        match self {
            EditorValue::Text(text) => text.clone(),
            EditorValue::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkbox {
    checked: bool,
    enabled: bool,
}

impl Checkbox {
    fn new(enabled: bool) -> Self {
        Self {
            checked: false,
            enabled,
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns false and leaves the box alone when it is disabled
    pub fn set(&mut self, checked: bool) -> bool {
        if self.enabled {
            self.checked = checked;
        }
        self.enabled
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditForm {
    pub property: String,
    pub mode: EditMode,
    /// `None` when resetting
    pub value: Option<EditorValue>,
    pub set_current: Checkbox,
    pub set_planned: Checkbox,
}

impl EditForm {
    fn to_update(&self) -> UpdatePropertyValue {
        let current = self.set_current.checked();
        let planned = self.set_planned.checked();
        match (&self.mode, &self.value) {
            (EditMode::Edit, Some(value)) => {
                UpdatePropertyValue::set(&value.as_param(), current, planned)
            }
            (EditMode::Edit, None) => UpdatePropertyValue::set("", current, planned),
            (EditMode::Reset, _) => UpdatePropertyValue::reset(current, planned),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Server accepted the change; the table was reloaded
    Applied,
    Rejected,
    /// Another edit was opened while this one was in flight
    Superseded,
}

/// The row an overlay was opened for
#[derive(Clone, Debug)]
struct Pending {
    generation: u64,
    reference: String,
}

#[derive(Debug, Default)]
pub struct EditSession {
    state: OverlayState,
    form: Option<EditForm>,
    pending: Option<Pending>,
    generation: u64,
    status: Status,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        self.form.as_mut()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Reference of the row the overlay is open for
    pub fn pending_reference(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.reference.as_str())
    }

    pub fn open_edit(
        &mut self,
        view: &TableView<ConfigSetting>,
        property: &str,
    ) -> Result<MutationTicket> {
        self.open(view, property, EditMode::Edit)
    }

    pub fn open_reset(
        &mut self,
        view: &TableView<ConfigSetting>,
        property: &str,
    ) -> Result<MutationTicket> {
        self.open(view, property, EditMode::Reset)
    }

    fn open(
        &mut self,
        view: &TableView<ConfigSetting>,
        property: &str,
        mode: EditMode,
    ) -> Result<MutationTicket> {
        let reference = view
            .reference(property)
            .ok_or_else(|| ConsoleError::UnknownRow(property.to_string()))?;
        let record = view
            .record(property)
            .ok_or_else(|| ConsoleError::UnknownRow(property.to_string()))?;

        let value = match mode {
            EditMode::Edit => {
                let current = record.current_value.as_deref().unwrap_or("");
                Some(EditorValue::from_displayed(&decode(current)))
            }
            EditMode::Reset => None,
        };

        self.generation += 1;
        if let Some(previous) = self.pending.as_ref() {
            debug!(
                "Replacing open overlay for {} with {}",
                previous.reference, reference
            );
        }
        self.pending = Some(Pending {
            generation: self.generation,
            reference: reference.to_string(),
        });
        self.form = Some(EditForm {
            property: property.to_string(),
            mode,
            value,
            set_current: Checkbox::new(record.dynamic_property),
            set_planned: Checkbox::new(true),
        });
        self.state = match mode {
            EditMode::Edit => OverlayState::Editing,
            EditMode::Reset => OverlayState::Resetting,
        };
        self.status.clear();

        Ok(MutationTicket(self.generation))
    }

    /// Validate the form and move to Submitting. Nothing is sent when no
    /// checkbox is checked.
    pub fn prepare(&mut self) -> Result<(MutationTicket, MethodRequest)> {
        if !matches!(self.state, OverlayState::Editing | OverlayState::Resetting) {
            return Err(ConsoleError::NotEditing);
        }
        let (Some(form), Some(pending)) = (self.form.as_ref(), self.pending.as_ref()) else {
            return Err(ConsoleError::NotEditing);
        };

        if !form.set_current.checked() && !form.set_planned.checked() {
            self.status.validation(CHECK_ONE_MESSAGE);
            return Err(ConsoleError::Validation(CHECK_ONE_MESSAGE.to_string()));
        }

        let request = form.to_update().into_request(&pending.reference);
        let ticket = MutationTicket(pending.generation);
        self.state = OverlayState::Submitting;
        self.status.clear();
        Ok((ticket, request))
    }

    /// Apply the server's answer to the submission identified by `ticket`
    pub fn complete(
        &mut self,
        ticket: MutationTicket,
        outcome: std::result::Result<String, CimError>,
    ) -> MutationOutcome {
        let current = self.pending.as_ref().map(|p| p.generation);
        if current != Some(ticket.0) || self.state != OverlayState::Submitting {
            debug!("Ignoring superseded completion (generation {})", ticket.0);
            return MutationOutcome::Superseded;
        }

        if self.status.settle(outcome) {
            self.state = OverlayState::Idle;
            self.form = None;
            self.pending = None;
            MutationOutcome::Applied
        } else {
            self.state = match self.form.as_ref().map(|f| f.mode) {
                Some(EditMode::Reset) => OverlayState::Resetting,
                _ => OverlayState::Editing,
            };
            MutationOutcome::Rejected
        }
    }

    /// Validate, post, settle, and reload `view` once on success
    pub async fn submit(
        &mut self,
        client: &AdminClient,
        view: &mut TableView<ConfigSetting>,
    ) -> Result<MutationOutcome> {
        let (ticket, request) = self.prepare()?;
        let outcome = client.invoke_raw(&request).await;
        let result = self.complete(ticket, outcome);

        if result == MutationOutcome::Applied {
            info!("{} applied to {}", request.method, request.reference);
            view.reload(client).await;
        }
        Ok(result)
    }

    /// Close the overlay from any state
    pub fn close(&mut self) {
        self.state = OverlayState::Idle;
        self.form = None;
        self.pending = None;
        self.status.clear();
    }
}
