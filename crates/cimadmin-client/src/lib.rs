//! cimadmin-client - async client for the CIM-RS management API
//!
//! This crate provides:
//! - HTTP transport issuing GET/POST requests against the `/cimrs/` data endpoint
//! - Typed records for config settings, provider modules and indication subscriptions
//! - Method-invocation payloads and their responses
//! - `AdminClient` facade with one method per management operation

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod model;

pub use client::AdminClient;
pub use config::{AdminClientConfig, Endpoint};
pub use error::{CimError, Result};
pub use http::{CimHttpClient, Dispatched, Method, RequestMode, Transport, dispatch};
