//! Subcommand handlers. Each one drives a table view the way the console
//! page would and prints the resulting table or status.

use anyhow::bail;
use cimadmin_client::{
    AdminClient,
    model::{ConfigSetting, IndicationSubscription, ProviderModule},
};
use cimadmin_console::{
    EditSession, EditorValue, ModuleAction, ModuleControl, MutationOutcome, Record, ReloadOutcome,
    Status, TableView,
};
use tracing::info;

use crate::cli::{Command, ListKind, OutputFormat};

pub async fn run(client: &AdminClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { kind, format } => match kind {
            ListKind::Config => list::<ConfigSetting>(client, format).await,
            ListKind::Provider => list::<ProviderModule>(client, format).await,
            ListKind::Indication => list::<IndicationSubscription>(client, format).await,
        },
        Command::Set {
            property,
            value,
            current,
            planned,
        } => update(client, &property, Some(value), current, planned).await,
        Command::Reset {
            property,
            current,
            planned,
        } => update(client, &property, None, current, planned).await,
        Command::StartModule { name } => module(client, &name, ModuleAction::Start).await,
        Command::StopModule { name } => module(client, &name, ModuleAction::Stop).await,
    }
}

async fn list<R: Record>(client: &AdminClient, format: OutputFormat) -> anyhow::Result<()> {
    let mut view: TableView<R> = TableView::new();
    let outcome = view.reload(client).await;

    match format {
        OutputFormat::Html => println!("{}", view.table().to_html()),
        OutputFormat::Text => println!("{}", view.table().to_text()),
    }
    finish(view.status(), outcome != ReloadOutcome::Failed)
}

async fn update(
    client: &AdminClient,
    property: &str,
    value: Option<String>,
    current: bool,
    planned: bool,
) -> anyhow::Result<()> {
    let mut view: TableView<ConfigSetting> = TableView::new();
    if view.reload(client).await == ReloadOutcome::Failed {
        return finish(view.status(), false);
    }

    let mut session = EditSession::new();
    match &value {
        Some(_) => session.open_edit(&view, property)?,
        None => session.open_reset(&view, property)?,
    };

    if let Some(form) = session.form_mut() {
        if let Some(value) = value {
            form.value = Some(EditorValue::from_displayed(&value));
        }
        if current && !form.set_current.set(true) {
            bail!("{property} is not a dynamic property; its current value cannot be set");
        }
        form.set_planned.set(planned);
    }

    let outcome = match session.submit(client, &mut view).await {
        Ok(outcome) => outcome,
        Err(e) => {
            session.close();
            return Err(e.into());
        }
    };
    info!("Update of {} finished: {:?}", property, outcome);
    finish(session.status(), outcome == MutationOutcome::Applied)
}

async fn module(client: &AdminClient, name: &str, action: ModuleAction) -> anyhow::Result<()> {
    let mut view: TableView<ProviderModule> = TableView::new();
    if view.reload(client).await == ReloadOutcome::Failed {
        return finish(view.status(), false);
    }

    let mut control = ModuleControl::new();
    let outcome = match action {
        ModuleAction::Start => view.start_module(client, &mut control, name).await?,
        ModuleAction::Stop => view.stop_module(client, &mut control, name).await?,
    };
    finish(control.status(), outcome == MutationOutcome::Applied)
}

fn finish(status: &Status, ok: bool) -> anyhow::Result<()> {
    let text = status.to_string();
    if ok {
        if !text.is_empty() {
            println!("{}", text);
        }
        Ok(())
    } else {
        bail!("{}", text)
    }
}
