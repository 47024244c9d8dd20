//! Service configuration file
//!
//! A JSON object; every key is optional:
//!
//! ```json
//! {
//!   "host": "127.0.0.1",
//!   "port": 5000,
//!   "cors_origins": ["http://localhost:3000"],
//!   "database_path": "reservations.db",
//!   "log_level": "info",
//!   "log_json": false,
//!   "validation": "passthrough",
//!   "booking_rules": { "max_guests": 5 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::parse_level;
use crate::policy::{BookingRules, ValidationPolicy};

use super::args::DEFAULT_CONFIG_PATH;
use super::errors::{CliError, CliResult};

/// Full service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listener and CORS settings
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// SQLite database file (default "reservations.db")
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Log level or filter directive (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub log_json: bool,

    /// Payload validation applied on create and update
    #[serde(default)]
    pub validation: ValidationPolicy,

    /// Limits used when `validation` is "strict"
    #[serde(default)]
    pub booking_rules: BookingRules,
}

fn default_database_path() -> String {
    "reservations.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            database_path: default_database_path(),
            log_level: default_log_level(),
            log_json: false,
            validation: ValidationPolicy::default(),
            booking_rules: BookingRules::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: ServiceConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the explicit file if given, else the default file if present,
    /// else built-in defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        self.server
            .allowed_origins()
            .map_err(CliError::config_error)?;

        parse_level(&self.log_level)?;

        self.booking_rules
            .validate()
            .map_err(|e| CliError::config_error(e.to_string()))?;

        Ok(())
    }

    /// Get the database file as a path
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }
}
