//! reservations - a small, self-hostable reservation record-keeping service
//!
//! JSON endpoints to create, list, update and delete reservations, backed
//! by a single SQLite file.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod policy;
pub mod store;
