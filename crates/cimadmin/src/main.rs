//! cimadmin - command-line admin console for CIM-RS management servers.

mod cli;
mod commands;
mod settings;
mod startup;

use cimadmin_client::{AdminClient, CimError};
use clap::Parser;
use tracing::{debug, error};

use crate::cli::Cli;
use crate::settings::Settings;
use crate::startup::{LoggingConfig, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    let logging_config = LoggingConfig::new(&settings.log_level, cli.log_dir.clone());
    let _logging_guard = init_logging(&logging_config)?;

    debug!(server = %settings.server_addr, "Settings loaded");

    let client = match AdminClient::new(&settings.client_config()) {
        Ok(client) => client,
        Err(CimError::Construction(reason)) => {
            error!("Cannot create HTTP client: {}", reason);
            anyhow::bail!("ALERT: cannot create HTTP client: {}", reason);
        }
        Err(e) => return Err(e.into()),
    };

    commands::run(&client, cli.command).await
}
