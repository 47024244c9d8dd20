//! CLI command implementations
//!
//! `serve` boots in a fixed order: configuration, logging, store, then the
//! HTTP listener. Any failure before the listener is bound aborts startup.

use std::path::{Path, PathBuf};

use crate::http_server::{HttpServer, ReservationState};
use crate::log_event;
use crate::observability::{init_logging, Event};
use crate::policy::BookingPolicy;
use crate::store::{ReservationRepository, SqliteFileSource};

use super::args::{Cli, Command};
use super::config::ServiceConfig;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            host,
            port,
            database,
        } => {
            let mut cfg = ServiceConfig::resolve(config.as_deref())?;
            if let Some(host) = host {
                cfg.server.host = host;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            apply_database_override(&mut cfg, database);
            cfg.validate()?;
            serve(cfg)
        }
        Command::Init { config, database } => {
            let mut cfg = ServiceConfig::resolve(config.as_deref())?;
            apply_database_override(&mut cfg, database);
            cfg.validate()?;
            let path = init(&cfg)?;
            println!("Initialized reservation store at {}", path.display());
            Ok(())
        }
    }
}

fn apply_database_override(cfg: &mut ServiceConfig, database: Option<PathBuf>) {
    if let Some(database) = database {
        cfg.database_path = database.to_string_lossy().into_owned();
    }
}

/// Create the database file and reservation table.
///
/// Returns the path of the prepared file. Running it again is harmless.
pub fn init(config: &ServiceConfig) -> CliResult<PathBuf> {
    init_logging(&config.log_level, config.log_json)?;

    let path = config.database_path();
    prepare_store(&path)?;
    Ok(path)
}

/// Boot the service and serve until Ctrl-C
pub fn serve(config: ServiceConfig) -> CliResult<()> {
    init_logging(&config.log_level, config.log_json)?;
    log_event!(Event::BootStart);
    log_event!(
        Event::ConfigLoaded,
        addr = %config.server.socket_addr(),
        database = %config.database_path,
        validation = %config.validation
    );

    let repo = prepare_store(&config.database_path())?;
    let policy = BookingPolicy::from_config(config.validation, &config.booking_rules)
        .map_err(|e| CliError::config_error(e.to_string()))?;

    let server = HttpServer::new(config.server.clone(), ReservationState::new(repo, policy));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(server.start(shutdown_signal()))
        .map_err(|e| CliError::serve_failed(e.to_string()))?;

    log_event!(Event::ShutdownComplete);
    Ok(())
}

fn prepare_store(path: &Path) -> CliResult<ReservationRepository<SqliteFileSource>> {
    let repo = ReservationRepository::new(SqliteFileSource::new(path));

    if let Err(e) = repo.ensure_ready() {
        log_event!(Event::StoreFailed, database = %path.display(), error = %e);
        return Err(e.into());
    }

    log_event!(Event::StoreReady, database = %path.display());
    Ok(repo)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C; stop the process to shut down");
        std::future::pending::<()>().await;
    }
    log_event!(Event::ShutdownSignal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_database() {
        let dir = TempDir::new().unwrap();
        let config = ServiceConfig {
            database_path: dir.path().join("r.db").to_string_lossy().into_owned(),
            ..Default::default()
        };

        let path = init(&config).unwrap();
        assert!(path.exists());

        // idempotent
        init(&config).unwrap();
    }

    #[test]
    fn test_init_reports_unreachable_store() {
        let dir = TempDir::new().unwrap();
        let config = ServiceConfig {
            database_path: dir
                .path()
                .join("missing/r.db")
                .to_string_lossy()
                .into_owned(),
            ..Default::default()
        };

        let err = init(&config).unwrap_err();
        assert_eq!(err.code_str(), "RESV_CLI_STORE_ERROR");
    }

    #[test]
    fn test_database_override() {
        let mut cfg = ServiceConfig::default();
        apply_database_override(&mut cfg, Some(PathBuf::from("/tmp/other.db")));
        assert_eq!(cfg.database_path, "/tmp/other.db");

        apply_database_override(&mut cfg, None);
        assert_eq!(cfg.database_path, "/tmp/other.db");
    }
}
