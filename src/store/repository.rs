//! # Reservation Repository
//!
//! One SQL statement per operation against the `Reservations` table.
//!
//! Each call acquires its own connection from the [`ConnectionSource`],
//! runs exactly one statement and lets the connection drop before
//! returning, on the error path as well. Statements run in SQLite's
//! autocommit mode, so a successful mutating call is already committed.
//!
//! Updating or deleting an id that does not exist is not an error: the
//! call succeeds and reports zero affected rows.

use std::sync::Arc;

use rusqlite::types::ValueRef;
use rusqlite::{params, Row};
use tracing::debug;

use super::connection::ConnectionSource;
use super::errors::StoreResult;
use super::model::{Reservation, ReservationId, ReservationInput};

const INSERT_SQL: &str = "INSERT INTO Reservations (reservation_datetime, reservation_first_name, reservation_last_name, phone_number, number_of_guests) VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_ALL_SQL: &str = "SELECT ID, reservation_datetime, reservation_first_name, reservation_last_name, phone_number, number_of_guests FROM Reservations";

const UPDATE_SQL: &str = "UPDATE Reservations SET reservation_datetime = ?1, reservation_first_name = ?2, reservation_last_name = ?3, phone_number = ?4, number_of_guests = ?5 WHERE ID = ?6";

const DELETE_SQL: &str = "DELETE FROM Reservations WHERE ID = ?1";

const COUNT_AT_SQL: &str =
    "SELECT COUNT(*) FROM Reservations WHERE reservation_datetime = ?1 AND (?2 IS NULL OR ID != ?2)";

/// CRUD access to stored reservations
pub struct ReservationRepository<S: ConnectionSource> {
    source: Arc<S>,
}

impl<S: ConnectionSource> Clone for ReservationRepository<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: ConnectionSource> ReservationRepository<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Make sure the store is reachable and the table exists
    pub fn ensure_ready(&self) -> StoreResult<()> {
        self.source.acquire().map(drop)
    }

    /// Insert a new row and return the id the store assigned to it
    pub fn create(&self, input: &ReservationInput) -> StoreResult<ReservationId> {
        let conn = self.source.acquire()?;
        conn.execute(
            INSERT_SQL,
            params![
                input.reservation_datetime,
                input.first_name,
                input.last_name,
                input.phone_number,
                input.number_of_guests,
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!(event = "reservation_created", reservation_id = id);
        Ok(id)
    }

    /// Every row in the table, in the order the store returns them
    pub fn list_all(&self) -> StoreResult<Vec<Reservation>> {
        let conn = self.source.acquire()?;
        let mut stmt = conn.prepare(SELECT_ALL_SQL)?;
        let reservations = stmt
            .query_map([], map_reservation)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(event = "reservations_listed", count = reservations.len());
        Ok(reservations)
    }

    /// Overwrite all five data columns of the row with `id`.
    ///
    /// Returns the number of rows changed, which is 0 when no row matches.
    pub fn update_by_id(&self, id: ReservationId, input: &ReservationInput) -> StoreResult<usize> {
        let conn = self.source.acquire()?;
        let changed = conn.execute(
            UPDATE_SQL,
            params![
                input.reservation_datetime,
                input.first_name,
                input.last_name,
                input.phone_number,
                input.number_of_guests,
                id,
            ],
        )?;

        debug!(event = "reservation_updated", reservation_id = id, rows_affected = changed);
        Ok(changed)
    }

    /// Remove the row with `id`. Returns 0 when no row matches.
    pub fn delete_by_id(&self, id: ReservationId) -> StoreResult<usize> {
        let conn = self.source.acquire()?;
        let changed = conn.execute(DELETE_SQL, params![id])?;

        debug!(event = "reservation_deleted", reservation_id = id, rows_affected = changed);
        Ok(changed)
    }

    /// Number of reservations booked for exactly `datetime`, optionally
    /// leaving out one row (the one being updated).
    pub fn count_at(&self, datetime: &str, exclude: Option<ReservationId>) -> StoreResult<u32> {
        let conn = self.source.acquire()?;
        let count: u32 = conn.query_row(COUNT_AT_SQL, params![datetime, exclude], |row| row.get(0))?;
        Ok(count)
    }
}

fn map_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: row.get(0)?,
        reservation_datetime: text_column(row, 1)?,
        first_name: text_column(row, 2)?,
        last_name: text_column(row, 3)?,
        phone_number: text_column(row, 4)?,
        number_of_guests: guest_column(row, 5)?,
    })
}

/// Read a column as text whatever storage class SQLite picked for it.
///
/// `TIMESTAMP` has numeric affinity, so a value such as `"2024"` comes back
/// as an integer.
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}

/// Read the guest count, keeping only values that are whole numbers.
///
/// Rows written by other clients may hold a REAL or free text here. Those
/// that do not carry an exact integer read back as `None`.
fn guest_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        ValueRef::Text(t) => std::str::from_utf8(t)
            .ok()
            .and_then(|s| s.trim().parse().ok()),
        ValueRef::Null | ValueRef::Real(_) | ValueRef::Blob(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteFileSource;
    use tempfile::TempDir;

    fn repo() -> (TempDir, ReservationRepository<SqliteFileSource>) {
        let dir = TempDir::new().unwrap();
        let repo = ReservationRepository::new(SqliteFileSource::new(dir.path().join("test.db")));
        (dir, repo)
    }

    fn input(datetime: &str, guests: i64) -> ReservationInput {
        ReservationInput {
            reservation_datetime: Some(datetime.to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            phone_number: Some("555-1234".to_string()),
            number_of_guests: Some(guests),
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let (_dir, repo) = repo();
        let first = repo.create(&input("2024-05-01T19:00:00", 2)).unwrap();
        let second = repo.create(&input("2024-05-01T19:30:00", 3)).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_list_all_on_empty_table() {
        let (_dir, repo) = repo();
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_numeric_looking_datetime_reads_back_as_text() {
        let (_dir, repo) = repo();
        repo.create(&input("2024", 2)).unwrap();

        let rows = repo.list_all().unwrap();
        assert_eq!(rows[0].reservation_datetime.as_deref(), Some("2024"));
    }

    #[test]
    fn test_loosely_typed_guest_counts_do_not_break_listing() {
        let (dir, repo) = repo();
        repo.create(&input("2024-05-01T19:00:00", 2)).unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("test.db")).unwrap();
        for guests in [
            rusqlite::types::Value::Real(2.5),
            rusqlite::types::Value::Real(4.0),
            rusqlite::types::Value::Text("two".to_string()),
            rusqlite::types::Value::Text("3".to_string()),
        ] {
            conn.execute(
                "INSERT INTO Reservations (number_of_guests) VALUES (?1)",
                params![guests],
            )
            .unwrap();
        }
        drop(conn);

        let guests: Vec<_> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.number_of_guests)
            .collect();
        assert_eq!(guests, vec![Some(2), None, Some(4), None, Some(3)]);
    }

    #[test]
    fn test_count_at_excludes_given_id() {
        let (_dir, repo) = repo();
        let a = repo.create(&input("2024-05-01T19:00:00", 2)).unwrap();
        repo.create(&input("2024-05-01T19:00:00", 2)).unwrap();
        repo.create(&input("2024-05-01T20:00:00", 2)).unwrap();

        assert_eq!(repo.count_at("2024-05-01T19:00:00", None).unwrap(), 2);
        assert_eq!(repo.count_at("2024-05-01T19:00:00", Some(a)).unwrap(), 1);
        assert_eq!(repo.count_at("2024-05-02T19:00:00", None).unwrap(), 0);
    }

    #[test]
    fn test_missing_id_reports_zero_rows() {
        let (_dir, repo) = repo();
        assert_eq!(repo.update_by_id(99999, &input("x", 1)).unwrap(), 0);
        assert_eq!(repo.delete_by_id(99999).unwrap(), 0);
    }

    #[test]
    fn test_unreachable_store_fails_every_operation() {
        let dir = TempDir::new().unwrap();
        let repo = ReservationRepository::new(SqliteFileSource::new(
            dir.path().join("missing/test.db"),
        ));

        assert!(repo.ensure_ready().unwrap_err().is_unavailable());
        assert!(repo.create(&ReservationInput::default()).unwrap_err().is_unavailable());
        assert!(repo.list_all().unwrap_err().is_unavailable());
        assert!(repo.update_by_id(1, &ReservationInput::default()).unwrap_err().is_unavailable());
        assert!(repo.delete_by_id(1).unwrap_err().is_unavailable());
    }
}
