//! Booking policy violations

use thiserror::Error;

/// Result type for policy checks
pub type PolicyResult<T> = Result<T, PolicyError>;

/// A rule the submitted reservation breaks.
///
/// Only the first violation found is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("reservation_datetime must look like YYYY-MM-DDTHH:MM, got \"{0}\"")]
    InvalidDatetime(String),

    #[error("Reservation date should be at least {0} days from the current date")]
    TooSoon(i64),

    #[error("Reservation time should be between {first} and {last}")]
    OutsideSeatingHours { first: String, last: String },

    #[error("Reservation time should be divisible by {0} minutes")]
    OffSlot(u32),

    #[error("There are already {0} reservations for this date and time")]
    SlotFull(u32),

    #[error("{0} should only contain letters and spaces")]
    InvalidName(&'static str),

    #[error("Number of guests should be between {min} and {max}")]
    GuestCount { min: i64, max: i64 },

    #[error("Phone number should start with \"+\" and have 12 digits, or start with \"0\" and have 11 digits")]
    InvalidPhone,

    /// Booking rules in the configuration are inconsistent
    #[error("Invalid booking rules: {0}")]
    InvalidRules(String),
}
