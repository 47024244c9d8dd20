//! Configurable booking limits
//!
//! Defaults reproduce the rules of the restaurant's booking form: evening
//! seatings from 18:00 to 21:30 on the half hour, booked at least two days
//! ahead, one to five guests, three tables per seating.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::errors::{PolicyError, PolicyResult};

const TIME_FORMAT: &str = "%H:%M";
const MAX_LEAD_DAYS: i64 = 365;

/// Limits enforced by the strict validation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRules {
    /// Minimum whole days between now and the reservation
    #[serde(default = "default_min_lead_days")]
    pub min_lead_days: i64,

    /// Earliest seating, "HH:MM"
    #[serde(default = "default_first_seating")]
    pub first_seating: String,

    /// Latest seating, "HH:MM" (inclusive)
    #[serde(default = "default_last_seating")]
    pub last_seating: String,

    /// Seatings start on multiples of this many minutes
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,

    #[serde(default = "default_min_guests")]
    pub min_guests: i64,

    #[serde(default = "default_max_guests")]
    pub max_guests: i64,

    /// Reservations allowed to share one date and time
    #[serde(default = "default_slot_capacity")]
    pub slot_capacity: u32,
}

fn default_min_lead_days() -> i64 {
    2
}
fn default_first_seating() -> String {
    "18:00".to_string()
}
fn default_last_seating() -> String {
    "21:30".to_string()
}
fn default_slot_minutes() -> u32 {
    30
}
fn default_min_guests() -> i64 {
    1
}
fn default_max_guests() -> i64 {
    5
}
fn default_slot_capacity() -> u32 {
    3
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            min_lead_days: default_min_lead_days(),
            first_seating: default_first_seating(),
            last_seating: default_last_seating(),
            slot_minutes: default_slot_minutes(),
            min_guests: default_min_guests(),
            max_guests: default_max_guests(),
            slot_capacity: default_slot_capacity(),
        }
    }
}

/// Seating window after parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatingHours {
    pub first: NaiveTime,
    pub last: NaiveTime,
}

impl BookingRules {
    /// Check the rules are usable and return the parsed seating window
    pub fn validate(&self) -> PolicyResult<SeatingHours> {
        let first = parse_time("first_seating", &self.first_seating)?;
        let last = parse_time("last_seating", &self.last_seating)?;

        if first > last {
            return Err(PolicyError::InvalidRules(format!(
                "first_seating {} is after last_seating {}",
                self.first_seating, self.last_seating
            )));
        }
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(PolicyError::InvalidRules(format!(
                "slot_minutes must divide an hour, got {}",
                self.slot_minutes
            )));
        }
        if self.min_guests < 1 || self.min_guests > self.max_guests {
            return Err(PolicyError::InvalidRules(format!(
                "guest range {}..={} is empty or below 1",
                self.min_guests, self.max_guests
            )));
        }
        if self.slot_capacity == 0 {
            return Err(PolicyError::InvalidRules(
                "slot_capacity must be > 0".to_string(),
            ));
        }
        if !(0..=MAX_LEAD_DAYS).contains(&self.min_lead_days) {
            return Err(PolicyError::InvalidRules(format!(
                "min_lead_days must be within 0..={}",
                MAX_LEAD_DAYS
            )));
        }

        Ok(SeatingHours { first, last })
    }
}

fn parse_time(field: &str, value: &str) -> PolicyResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| {
        PolicyError::InvalidRules(format!("{} \"{}\": {}", field, value, e))
    })
}
