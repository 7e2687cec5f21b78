//! Error types for console views

use cimadmin_client::CimError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Validation(String),

    #[error("no row for {0}")]
    UnknownRow(String),

    #[error("no edit in progress")]
    NotEditing,

    #[error(transparent)]
    Client(#[from] CimError),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
