//! # Response Formatting
//!
//! Bodies returned by the reservation endpoints on success.

use serde::{Deserialize, Serialize};

pub const CREATED_MESSAGE: &str = "Reservation created successfully";
pub const UPDATED_MESSAGE: &str = "Reservation updated successfully";
pub const DELETED_MESSAGE: &str = "Reservation deleted successfully";

/// `{"message": "..."}` confirmation body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn created() -> Self {
        Self::new(CREATED_MESSAGE)
    }

    pub fn updated() -> Self {
        Self::new(UPDATED_MESSAGE)
    }

    pub fn deleted() -> Self {
        Self::new(DELETED_MESSAGE)
    }
}
