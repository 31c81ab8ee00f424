//! Solo Arc daemon library
//!
//! Process wiring for `soloed`:
//! - layered configuration (defaults, file, `SOLO_` environment)
//! - the MCP stdio transport
//! - the `/api/v1` HTTP API

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::{DaemonConfig, Transport};
pub use error::{ApiError, DaemonError, DaemonResult};
pub use server::Server;
