//! CLI module for the reservation service
//!
//! Provides command-line interface for:
//! - serve: Load configuration, prepare the store, serve HTTP
//! - init: Create the database file and table

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{init, run, run_command, serve};
pub use config::ServiceConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
