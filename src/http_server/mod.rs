//! # HTTP Server Module
//!
//! Exposes the reservation repository over JSON endpoints.
//!
//! # Endpoints
//!
//! - `POST /reservations` - create a reservation
//! - `GET /reservations` - list every reservation
//! - `PUT /reservations/{id}` - overwrite a reservation
//! - `DELETE /reservations/{id}` - remove a reservation
//! - `GET /health` - liveness check

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod reservation_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, RestError, RestResult};
pub use reservation_routes::{reservation_routes, ReservationState};
pub use response::MessageResponse;
pub use server::HttpServer;
