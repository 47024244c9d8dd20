//! # Validation Policy
//!
//! Decides what a create or update payload must look like before it is
//! written.
//!
//! - `passthrough` stores whatever the client sent, nulls included.
//! - `strict` applies the booking rules: every field present, an evening
//!   seating on a slot boundary far enough ahead, a plausible party size
//!   and phone number, and room left in the seating.
//!
//! Field checks are pure. The seating capacity check needs the current
//! number of bookings for the slot, which the caller reads from the store
//! and passes to [`BookingPolicy::check_capacity`].

mod errors;
mod rules;

pub use errors::{PolicyError, PolicyResult};
pub use rules::{BookingRules, SeatingHours};

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::store::ReservationInput;

/// Datetime layouts accepted from clients, with and without seconds
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Layout reservation datetimes are stored in under the strict policy
const STORED_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAME_PATTERN: &str = r"^[a-zA-Z\s]+$";
const PHONE_PATTERN: &str = r"^(\+[0-9]{12}|0[0-9]{10})$";

/// Which validation runs on incoming payloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    #[default]
    Passthrough,
    Strict,
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPolicy::Passthrough => write!(f, "passthrough"),
            ValidationPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Source of "now" for lead-time checks
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

struct StrictRules {
    rules: BookingRules,
    hours: SeatingHours,
    name_re: Regex,
    phone_re: Regex,
    clock: Clock,
}

/// Applies a [`ValidationPolicy`] to reservation payloads
#[derive(Clone)]
pub struct BookingPolicy {
    strict: Option<Arc<StrictRules>>,
}

impl fmt::Debug for BookingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingPolicy")
            .field("mode", &self.mode())
            .field("rules", &self.strict.as_ref().map(|s| &s.rules))
            .finish()
    }
}

impl BookingPolicy {
    /// Accept every payload unchanged
    pub fn passthrough() -> Self {
        Self { strict: None }
    }

    /// Enforce `rules`, measuring lead time against the local wall clock
    pub fn strict(rules: BookingRules) -> PolicyResult<Self> {
        Self::strict_with_clock(rules, Arc::new(|| Local::now().naive_local()))
    }

    pub fn strict_with_clock(rules: BookingRules, clock: Clock) -> PolicyResult<Self> {
        let hours = rules.validate()?;
        let name_re =
            Regex::new(NAME_PATTERN).map_err(|e| PolicyError::InvalidRules(e.to_string()))?;
        let phone_re =
            Regex::new(PHONE_PATTERN).map_err(|e| PolicyError::InvalidRules(e.to_string()))?;

        Ok(Self {
            strict: Some(Arc::new(StrictRules {
                rules,
                hours,
                name_re,
                phone_re,
                clock,
            })),
        })
    }

    /// Build the policy a configuration asks for
    pub fn from_config(mode: ValidationPolicy, rules: &BookingRules) -> PolicyResult<Self> {
        match mode {
            ValidationPolicy::Passthrough => Ok(Self::passthrough()),
            ValidationPolicy::Strict => Self::strict(rules.clone()),
        }
    }

    pub fn mode(&self) -> ValidationPolicy {
        if self.strict.is_some() {
            ValidationPolicy::Strict
        } else {
            ValidationPolicy::Passthrough
        }
    }

    /// Validate the payload fields and return the input to store.
    ///
    /// Under the strict policy the datetime is rewritten to
    /// `YYYY-MM-DDTHH:MM:SS` so bookings for one seating compare equal.
    pub fn check_fields(&self, input: ReservationInput) -> PolicyResult<ReservationInput> {
        let Some(strict) = self.strict.as_deref() else {
            return Ok(input);
        };

        let datetime = required("reservation_datetime", input.reservation_datetime.as_deref())?;
        let first_name = required("reservation_first_name", input.first_name.as_deref())?;
        let last_name = required("reservation_last_name", input.last_name.as_deref())?;
        let phone = required("phone_number", input.phone_number.as_deref())?;
        let guests = input
            .number_of_guests
            .ok_or(PolicyError::MissingField("number_of_guests"))?;

        let at = parse_datetime(datetime)?;
        strict.check_datetime(at)?;

        if !strict.name_re.is_match(first_name) {
            return Err(PolicyError::InvalidName("reservation_first_name"));
        }
        if !strict.name_re.is_match(last_name) {
            return Err(PolicyError::InvalidName("reservation_last_name"));
        }

        let rules = &strict.rules;
        if guests < rules.min_guests || guests > rules.max_guests {
            return Err(PolicyError::GuestCount {
                min: rules.min_guests,
                max: rules.max_guests,
            });
        }

        if !strict.phone_re.is_match(phone) {
            return Err(PolicyError::InvalidPhone);
        }

        Ok(ReservationInput {
            reservation_datetime: Some(at.format(STORED_DATETIME_FORMAT).to_string()),
            ..input
        })
    }

    /// The datetime whose bookings count against seating capacity, if the
    /// policy limits capacity at all
    pub fn capacity_slot<'a>(&self, checked: &'a ReservationInput) -> Option<&'a str> {
        self.strict.as_ref()?;
        checked.reservation_datetime.as_deref()
    }

    /// Reject when the seating already holds `booked` reservations at capacity
    pub fn check_capacity(&self, booked: u32) -> PolicyResult<()> {
        match self.strict.as_deref() {
            Some(strict) if booked >= strict.rules.slot_capacity => {
                Err(PolicyError::SlotFull(booked))
            }
            _ => Ok(()),
        }
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self::passthrough()
    }
}

impl StrictRules {
    fn check_datetime(&self, at: NaiveDateTime) -> PolicyResult<()> {
        let now = (self.clock)();
        if at - now < Duration::days(self.rules.min_lead_days) {
            return Err(PolicyError::TooSoon(self.rules.min_lead_days));
        }

        let time = at.time();
        if time < self.hours.first || time > self.hours.last {
            return Err(PolicyError::OutsideSeatingHours {
                first: self.rules.first_seating.clone(),
                last: self.rules.last_seating.clone(),
            });
        }

        if time.minute() % self.rules.slot_minutes != 0 || time.second() != 0 {
            return Err(PolicyError::OffSlot(self.rules.slot_minutes));
        }

        Ok(())
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> PolicyResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PolicyError::MissingField(field)),
    }
}

fn parse_datetime(value: &str) -> PolicyResult<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| PolicyError::InvalidDatetime(value.to_string()))
}
