//! Liveness probe at `GET /health`. Never opens the store, so it answers
//! even when the database file is unreachable.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Body of `GET /health`
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(|| async { Json(HealthResponse::ok()) }))
}
