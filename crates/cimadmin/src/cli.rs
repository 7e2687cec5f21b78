//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "cimadmin", version, about = "Admin console for CIM-RS management servers")]
pub struct Cli {
    /// Settings file (YAML, TOML or JSON)
    #[arg(short = 'c', long = "config", env = "CIMADMIN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Server origin, e.g. http://127.0.0.1:5988
    #[arg(short = 's', long = "server", env = "CIMADMIN_SERVER", global = true)]
    pub server: Option<String>,

    #[arg(long = "connect-timeout-ms", global = true)]
    pub connect_timeout_ms: Option<u64>,

    #[arg(long = "read-timeout-ms", global = true)]
    pub read_timeout_ms: Option<u64>,

    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Also write logs to a rolling file in this directory
    #[arg(long = "log-dir", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List one table
    List {
        #[arg(value_enum)]
        kind: ListKind,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Set a config property's current and/or planned value
    Set {
        property: String,
        value: String,
        #[arg(long)]
        current: bool,
        #[arg(long)]
        planned: bool,
    },
    /// Reset a config property to its default
    Reset {
        property: String,
        #[arg(long)]
        current: bool,
        #[arg(long)]
        planned: bool,
    },
    /// Start a provider module
    StartModule { name: String },
    /// Stop a provider module
    StopModule { name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Config,
    Provider,
    Indication,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    #[default]
    Text,
}
