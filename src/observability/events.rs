//! Lifecycle events of the reservation service
//!
//! Events are explicit and typed. Request-level activity is traced by the
//! HTTP layer and the repository instead.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Database file opened and reservation table ensured
    StoreReady,
    /// Store could not be prepared (FATAL)
    StoreFailed,
    /// HTTP listener bound, serving requests
    ServerListening,
    /// Ctrl-C received, draining in-flight requests
    ShutdownSignal,
    /// Server stopped
    ShutdownComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreReady => "STORE_READY",
            Event::StoreFailed => "STORE_FAILED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownSignal => "SHUTDOWN_SIGNAL",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
        }
    }

    /// Returns true if this event ends the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StoreFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
