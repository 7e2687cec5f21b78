//! cimadmin-console - table views for the CIM admin console
//!
//! Each table kind (config settings, provider modules, indication
//! subscriptions) gets a [`TableView`] that owns its rows, its row-reference
//! map and its status indicator. A view is rebuilt from scratch on every
//! reload; there is no incremental update path. Config settings are edited
//! through an [`EditSession`], provider modules are started and stopped
//! through [`TableView::start_module`] and [`TableView::stop_module`].

pub mod edit;
pub mod error;
pub mod kind;
pub mod provider;
pub mod render;
pub mod status;
pub mod table;
pub mod view;

pub use edit::{
    Checkbox, EditForm, EditMode, EditSession, EditorValue, MutationOutcome, MutationTicket,
    OverlayState,
};
pub use error::ConsoleError;
pub use kind::{Record, SortPolicy, StripeRule, TableKind};
pub use provider::{ModuleAction, ModuleControl, PENDING_REQUESTS_MESSAGE};
pub use status::{Indicator, Status};
pub use table::{Cell, FALSE_GLYPH, TRUE_GLYPH, Table, TableRow};
pub use view::{ReloadOutcome, ReloadTicket, TableView};
