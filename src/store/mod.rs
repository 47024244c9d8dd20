//! # Reservation Store
//!
//! Persistence for reservation records in a single SQLite file.
//!
//! - `connection` - scoped connection acquisition and schema bootstrap
//! - `repository` - create / list / update / delete statements
//! - `model` - the stored record and the client payload

pub mod connection;
pub mod errors;
pub mod model;
pub mod repository;

pub use connection::{ConnectionSource, SqliteFileSource};
pub use errors::{StoreError, StoreResult};
pub use model::{Reservation, ReservationId, ReservationInput};
pub use repository::ReservationRepository;
