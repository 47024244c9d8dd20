//! Reservation Store Tests
//!
//! Repository behavior against a real SQLite file:
//! - create then list returns the input verbatim
//! - update overwrites every field and keeps the id
//! - delete removes exactly one row
//! - unknown ids on update/delete succeed as no-ops

use reservations::store::{Reservation, ReservationInput, ReservationRepository, SqliteFileSource};
use tempfile::TempDir;

fn repo(dir: &TempDir) -> ReservationRepository<SqliteFileSource> {
    ReservationRepository::new(SqliteFileSource::new(dir.path().join("reservations.db")))
}

fn ada() -> ReservationInput {
    ReservationInput {
        reservation_datetime: Some("2024-05-01T19:00:00".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        phone_number: Some("555-1234".to_string()),
        number_of_guests: Some(2),
    }
}

fn grace() -> ReservationInput {
    ReservationInput {
        reservation_datetime: Some("2024-05-02T20:30:00".to_string()),
        first_name: Some("Grace".to_string()),
        last_name: Some("Hopper".to_string()),
        phone_number: Some("555-9876".to_string()),
        number_of_guests: Some(5),
    }
}

// =============================================================================
// Create / List
// =============================================================================

/// Creating a reservation adds exactly one row with the fields as given.
#[test]
fn test_create_then_list_returns_fields_verbatim() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    assert_eq!(repo.list_all().unwrap().len(), 0);

    let id = repo.create(&ada()).unwrap();
    let rows = repo.list_all().unwrap();

    assert_eq!(rows, vec![ada().with_id(id)]);
}

/// Nulls are stored as nulls, not as empty strings or zeros.
#[test]
fn test_create_with_all_fields_missing() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);

    let id = repo.create(&ReservationInput::default()).unwrap();
    let rows = repo.list_all().unwrap();

    assert_eq!(
        rows,
        vec![Reservation {
            id,
            reservation_datetime: None,
            first_name: None,
            last_name: None,
            phone_number: None,
            number_of_guests: None,
        }]
    );
}

/// Rows come back in insertion order.
#[test]
fn test_list_preserves_insertion_order() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);

    let first = repo.create(&ada()).unwrap();
    let second = repo.create(&grace()).unwrap();

    let ids: Vec<_> = repo.list_all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first, second]);
}

/// Separate repositories over the same file see the same rows.
#[test]
fn test_data_survives_new_repository() {
    let dir = TempDir::new().unwrap();
    let id = repo(&dir).create(&ada()).unwrap();

    let rows = repo(&dir).list_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
}

// =============================================================================
// Update
// =============================================================================

/// Update replaces the fields and leaves the id alone.
#[test]
fn test_update_overwrites_fields_and_keeps_id() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let id = repo.create(&ada()).unwrap();

    let changed = repo.update_by_id(id, &grace()).unwrap();
    assert_eq!(changed, 1);

    assert_eq!(repo.list_all().unwrap(), vec![grace().with_id(id)]);
}

/// Update is a full replace: omitted fields become null.
#[test]
fn test_update_is_full_replace() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let id = repo.create(&ada()).unwrap();

    let partial = ReservationInput {
        number_of_guests: Some(4),
        ..Default::default()
    };
    repo.update_by_id(id, &partial).unwrap();

    let row = &repo.list_all().unwrap()[0];
    assert_eq!(row.id, id);
    assert_eq!(row.number_of_guests, Some(4));
    assert_eq!(row.first_name, None);
    assert_eq!(row.reservation_datetime, None);
}

/// Update only touches the row with the given id.
#[test]
fn test_update_leaves_other_rows() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let a = repo.create(&ada()).unwrap();
    let g = repo.create(&grace()).unwrap();

    repo.update_by_id(a, &grace()).unwrap();

    let rows = repo.list_all().unwrap();
    assert_eq!(rows, vec![grace().with_id(a), grace().with_id(g)]);
}

// =============================================================================
// Delete
// =============================================================================

/// Delete removes exactly the requested row.
#[test]
fn test_delete_removes_only_target() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let a = repo.create(&ada()).unwrap();
    let g = repo.create(&grace()).unwrap();

    assert_eq!(repo.delete_by_id(a).unwrap(), 1);

    assert_eq!(repo.list_all().unwrap(), vec![grace().with_id(g)]);
}

/// Deleting twice: first removes, second is a no-op, same final state.
#[test]
fn test_delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let a = repo.create(&ada()).unwrap();
    repo.create(&grace()).unwrap();

    assert_eq!(repo.delete_by_id(a).unwrap(), 1);
    let after_first = repo.list_all().unwrap();

    assert_eq!(repo.delete_by_id(a).unwrap(), 0);
    assert_eq!(repo.list_all().unwrap(), after_first);
}

/// Unknown ids are expected to succeed with zero rows affected.
#[test]
fn test_unknown_id_is_noop() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);

    assert_eq!(repo.update_by_id(99999, &ada()).unwrap(), 0);
    assert_eq!(repo.delete_by_id(99999).unwrap(), 0);
    assert!(repo.list_all().unwrap().is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

/// Concurrent writers on separate connections all land with distinct ids.
#[test]
fn test_concurrent_creates() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    repo.ensure_ready().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            std::thread::spawn(move || {
                for _ in 0..5 {
                    repo.create(&ada()).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let rows = repo.list_all().unwrap();
    assert_eq!(rows.len(), 40);
    let mut ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 40);
}
