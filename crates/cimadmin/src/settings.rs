//! Layered settings: defaults, then the settings file, then `CIMADMIN_*`
//! environment variables, then command-line flags.

use std::path::Path;

use cimadmin_client::{
    AdminClientConfig,
    constants::{DEFAULT_DATA_PATH, DEFAULT_SERVER_ADDR},
};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::cli::Cli;

const ENV_PREFIX: &str = "CIMADMIN";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server_addr: String,
    pub data_path: String,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub log_level: String,
}

impl Settings {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::load_from(cli.config.as_deref(), cli)
    }

    fn load_from(file: Option<&Path>, cli: &Cli) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .set_default("server_addr", DEFAULT_SERVER_ADDR)?
            .set_default("data_path", DEFAULT_DATA_PATH)?
            .set_default("connect_timeout_ms", 0)?
            .set_default("read_timeout_ms", 0)?
            .set_default("log_level", "info")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        if let Some(v) = &cli.server {
            builder = builder.set_override("server_addr", v.as_str())?;
        }
        if let Some(v) = cli.connect_timeout_ms {
            builder = builder.set_override("connect_timeout_ms", v)?;
        }
        if let Some(v) = cli.read_timeout_ms {
            builder = builder.set_override("read_timeout_ms", v)?;
        }
        if let Some(v) = &cli.log_level {
            builder = builder.set_override("log_level", v.as_str())?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn client_config(&self) -> AdminClientConfig {
        AdminClientConfig::new(&self.server_addr)
            .with_timeouts(self.connect_timeout_ms, self.read_timeout_ms)
            .with_data_path(&self.data_path)
    }
}
