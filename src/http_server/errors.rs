//! # HTTP Errors
//!
//! Every failure on the reservation endpoints becomes a JSON body of the
//! form `{"error": "<message>"}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::policy::PolicyError;
use crate::store::StoreError;

/// Result type for endpoint handlers
pub type RestResult<T> = Result<T, RestError>;

/// Endpoint errors
#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not JSON or a field has the wrong type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path id is not an integer; no route matches it
    #[error("Not Found: {0}")]
    InvalidId(String),

    /// Payload rejected by the validation policy
    #[error("{0}")]
    Policy(#[from] PolicyError),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The store failed, including when it could not be opened
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Anything else that went wrong while handling the request
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidId(_) => StatusCode::NOT_FOUND,
            RestError::Policy(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for RestError {
    fn from(rejection: PathRejection) -> Self {
        RestError::InvalidId(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
