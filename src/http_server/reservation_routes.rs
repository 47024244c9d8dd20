//! Reservation HTTP Routes
//!
//! `POST/GET /reservations`, `PUT/DELETE /reservations/{id}`.
//!
//! Handlers are stateless per request. Store work is synchronous SQLite, so
//! it runs on tokio's blocking pool and never holds up the reactor.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::{debug, info};

use super::errors::{RestError, RestResult};
use super::response::MessageResponse;
use crate::policy::BookingPolicy;
use crate::store::{
    ConnectionSource, Reservation, ReservationId, ReservationInput, ReservationRepository,
};

// ==================
// Shared State
// ==================

/// Repository and validation policy shared across handlers
pub struct ReservationState<S: ConnectionSource> {
    repo: ReservationRepository<S>,
    policy: BookingPolicy,
}

impl<S: ConnectionSource> ReservationState<S> {
    pub fn new(repo: ReservationRepository<S>, policy: BookingPolicy) -> Self {
        Self { repo, policy }
    }

    /// Validate and insert; returns the new id
    pub fn create(&self, input: ReservationInput) -> RestResult<ReservationId> {
        let input = self.checked(input, None)?;
        Ok(self.repo.create(&input)?)
    }

    pub fn list(&self) -> RestResult<Vec<Reservation>> {
        Ok(self.repo.list_all()?)
    }

    /// Validate and overwrite; returns rows affected (0 for an unknown id)
    pub fn update(&self, id: ReservationId, input: ReservationInput) -> RestResult<usize> {
        let input = self.checked(input, Some(id))?;
        Ok(self.repo.update_by_id(id, &input)?)
    }

    /// Returns rows affected (0 for an unknown id)
    pub fn delete(&self, id: ReservationId) -> RestResult<usize> {
        Ok(self.repo.delete_by_id(id)?)
    }

    fn checked(
        &self,
        input: ReservationInput,
        updating: Option<ReservationId>,
    ) -> RestResult<ReservationInput> {
        let input = self.policy.check_fields(input)?;
        if let Some(slot) = self.policy.capacity_slot(&input) {
            let booked = self.repo.count_at(slot, updating)?;
            self.policy.check_capacity(booked)?;
        }
        Ok(input)
    }
}

// ==================
// Reservation Routes
// ==================

/// Create reservation routes
pub fn reservation_routes<S: ConnectionSource>(state: Arc<ReservationState<S>>) -> Router {
    Router::new()
        .route(
            "/reservations",
            get(list_reservations_handler::<S>).post(create_reservation_handler::<S>),
        )
        .route(
            "/reservations/{id}",
            put(update_reservation_handler::<S>).delete(delete_reservation_handler::<S>),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Run store work on the blocking pool
async fn run_blocking<T, F>(work: F) -> RestResult<T>
where
    F: FnOnce() -> RestResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RestError::Internal(format!("store task failed: {}", e)))?
}

// ==================
// Handlers
// ==================

async fn create_reservation_handler<S: ConnectionSource>(
    State(state): State<Arc<ReservationState<S>>>,
    payload: Result<Json<ReservationInput>, JsonRejection>,
) -> RestResult<Json<MessageResponse>> {
    let Json(input) = payload?;

    let id = run_blocking(move || state.create(input)).await?;
    info!(event = "reservation_created", reservation_id = id);

    Ok(Json(MessageResponse::created()))
}

async fn list_reservations_handler<S: ConnectionSource>(
    State(state): State<Arc<ReservationState<S>>>,
) -> RestResult<Json<Vec<Reservation>>> {
    let reservations = run_blocking(move || state.list()).await?;
    Ok(Json(reservations))
}

async fn update_reservation_handler<S: ConnectionSource>(
    State(state): State<Arc<ReservationState<S>>>,
    id: Result<Path<ReservationId>, PathRejection>,
    payload: Result<Json<ReservationInput>, JsonRejection>,
) -> RestResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let Json(input) = payload?;

    let changed = run_blocking(move || state.update(id, input)).await?;
    if changed == 0 {
        debug!(event = "reservation_updated", reservation_id = id, "no row with this id");
    } else {
        info!(event = "reservation_updated", reservation_id = id);
    }

    Ok(Json(MessageResponse::updated()))
}

async fn delete_reservation_handler<S: ConnectionSource>(
    State(state): State<Arc<ReservationState<S>>>,
    id: Result<Path<ReservationId>, PathRejection>,
) -> RestResult<Json<MessageResponse>> {
    let Path(id) = id?;

    let changed = run_blocking(move || state.delete(id)).await?;
    if changed == 0 {
        debug!(event = "reservation_deleted", reservation_id = id, "no row with this id");
    } else {
        info!(event = "reservation_deleted", reservation_id = id);
    }

    Ok(Json(MessageResponse::deleted()))
}
