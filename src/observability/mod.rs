//! Observability for the reservation service
//!
//! - Structured logging through `tracing` (human or JSON lines)
//! - Typed lifecycle events
//!
//! # Usage
//!
//! ```ignore
//! use reservations::log_event;
//! use reservations::observability::{init_logging, Event};
//!
//! init_logging("info", false)?;
//! log_event!(Event::BootStart);
//! log_event!(Event::StoreReady, database = %path.display());
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, parse_level};

use std::fmt;

/// Observability error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservabilityErrorCode {
    /// Logging could not be set up
    ResvLoggingFailed,
}

impl ObservabilityErrorCode {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservabilityErrorCode::ResvLoggingFailed => "RESV_LOGGING_FAILED",
        }
    }
}

impl fmt::Display for ObservabilityErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observability error
#[derive(Debug)]
pub struct ObservabilityError {
    code: ObservabilityErrorCode,
    message: String,
}

impl ObservabilityError {
    /// Create a new observability error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: ObservabilityErrorCode::ResvLoggingFailed,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ObservabilityErrorCode {
        self.code
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ObservabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ObservabilityError {}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

/// Log a lifecycle event, with optional `tracing` fields.
///
/// Fatal events go out at `ERROR`, the rest at `INFO`. Fields keep their
/// names in the output, so JSON logs carry them as separate keys.
#[macro_export]
macro_rules! log_event {
    ($event:expr $(, $($fields:tt)+)?) => {{
        let event: $crate::observability::Event = $event;
        if event.is_fatal() {
            ::tracing::error!(event = event.as_str() $(, $($fields)+)?);
        } else {
            ::tracing::info!(event = event.as_str() $(, $($fields)+)?);
        }
    }};
}
