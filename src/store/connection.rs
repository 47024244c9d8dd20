//! # Connection Sources
//!
//! Hands out ready-to-use SQLite connections to the repository.
//!
//! A connection returned by [`ConnectionSource::acquire`] always has the
//! `Reservations` table in place. The repository drops it as soon as its
//! single statement has run, so no connection outlives one operation.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{debug, error};

use super::errors::{StoreError, StoreResult};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS Reservations (
    ID INTEGER PRIMARY KEY,
    reservation_datetime TIMESTAMP,
    reservation_first_name TEXT,
    reservation_last_name TEXT,
    phone_number TEXT,
    number_of_guests INTEGER
)";

/// How long a statement waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Scoped acquisition of store connections.
///
/// Implementations decide whether a connection is opened fresh or taken
/// from somewhere else; the repository only relies on getting a usable
/// connection and on dropping it when done.
pub trait ConnectionSource: Send + Sync + 'static {
    /// Return a connection whose schema is guaranteed to exist
    fn acquire(&self) -> StoreResult<Connection>;
}

/// Opens a new connection to a fixed database file on every call
#[derive(Debug, Clone)]
pub struct SqliteFileSource {
    path: PathBuf,
}

impl SqliteFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConnectionSource for SqliteFileSource {
    fn acquire(&self) -> StoreResult<Connection> {
        let started_at = Instant::now();

        let conn = Connection::open(&self.path).map_err(|e| {
            error!(
                event = "store_open",
                path = %self.path.display(),
                error = %e,
                "failed to open database file"
            );
            StoreError::Unavailable(e)
        })?;

        bootstrap_connection(&conn).map_err(|e| {
            error!(
                event = "store_open",
                path = %self.path.display(),
                error = %e,
                "failed to prepare database schema"
            );
            StoreError::Unavailable(e)
        })?;

        debug!(
            event = "store_open",
            path = %self.path.display(),
            duration_us = started_at.elapsed().as_micros() as u64,
            "connection ready"
        );
        Ok(conn)
    }
}

/// Busy timeout plus idempotent table creation
fn bootstrap_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(CREATE_TABLE_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table_count(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            ["Reservations"],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_acquire_creates_file_and_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reservations.db");
        let source = SqliteFileSource::new(&path);

        let conn = source.acquire().unwrap();
        assert!(path.exists());
        assert_eq!(table_count(&conn), 1);
    }

    #[test]
    fn test_acquire_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let source = SqliteFileSource::new(dir.path().join("reservations.db"));

        drop(source.acquire().unwrap());
        drop(source.acquire().unwrap());
        let conn = source.acquire().unwrap();
        assert_eq!(table_count(&conn), 1);
    }

    #[test]
    fn test_table_has_reference_columns() {
        let dir = TempDir::new().unwrap();
        let source = SqliteFileSource::new(dir.path().join("reservations.db"));
        let conn = source.acquire().unwrap();

        let mut stmt = conn.prepare("PRAGMA table_info(Reservations)").unwrap();
        let columns: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(1)?, row.get(2)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            columns,
            vec![
                ("ID".to_string(), "INTEGER".to_string()),
                ("reservation_datetime".to_string(), "TIMESTAMP".to_string()),
                ("reservation_first_name".to_string(), "TEXT".to_string()),
                ("reservation_last_name".to_string(), "TEXT".to_string()),
                ("phone_number".to_string(), "TEXT".to_string()),
                ("number_of_guests".to_string(), "INTEGER".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = SqliteFileSource::new(dir.path().join("no/such/dir/reservations.db"));

        let err = source.acquire().unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_corrupt_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reservations.db");
        std::fs::write(&path, vec![0x5a; 4096]).unwrap();

        let err = SqliteFileSource::new(&path).acquire().unwrap_err();
        assert!(err.is_unavailable());
    }
}
