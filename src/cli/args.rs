//! CLI argument definitions using clap
//!
//! Commands:
//! - reservations serve [--config <path>] [--host <host>] [--port <port>] [--database <path>]
//! - reservations init [--config <path>] [--database <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "./reservations.json";

/// Reservations - a small reservation record-keeping service
#[derive(Parser, Debug)]
#[command(name = "reservations")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (optional; defaults apply when absent)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Create the database file and reservation table, then exit
    Init {
        /// Path to configuration file (optional; defaults apply when absent)
        #[arg(long)]
        config: Option<PathBuf>,

        /// SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
