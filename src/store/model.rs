//! # Reservation Model
//!
//! The stored record and the payload accepted for create/update.
//!
//! Field names on the wire match the column names of the `Reservations`
//! table, so `first_name` travels as `reservation_first_name` and the
//! primary key as `ID`.

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{Error as _, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Row id assigned by the store
pub type ReservationId = i64;

/// A stored reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "ID")]
    pub id: ReservationId,
    pub reservation_datetime: Option<String>,
    #[serde(rename = "reservation_first_name")]
    pub first_name: Option<String>,
    #[serde(rename = "reservation_last_name")]
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub number_of_guests: Option<i64>,
}

/// Data fields of a reservation as received from a client.
///
/// Every field is optional. A missing key and an explicit `null` are the
/// same thing: the column is written as NULL. Updates overwrite all five
/// columns, so an omitted field clears the stored value. Only a JSON object
/// is accepted; positional arrays are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ReservationInput {
    #[serde(default)]
    pub reservation_datetime: Option<String>,
    #[serde(default, rename = "reservation_first_name")]
    pub first_name: Option<String>,
    #[serde(default, rename = "reservation_last_name")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_guest_count")]
    pub number_of_guests: Option<i64>,
}

impl Serialize for ReservationInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReservationInput::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ReservationInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(InputVisitor)
    }
}

struct InputVisitor;

impl<'de> Visitor<'de> for InputVisitor {
    type Value = ReservationInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of reservation fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        ReservationInput::deserialize(MapAccessDeserializer::new(map))
    }
}

impl ReservationInput {
    /// Attach the store-assigned id, producing the record as it would be listed
    pub fn with_id(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            reservation_datetime: self.reservation_datetime,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            number_of_guests: self.number_of_guests,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GuestCount {
    Number(i64),
    Text(String),
}

/// Accepts `4`, `"4"` or `null`. Form inputs submit numbers as strings.
fn deserialize_guest_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<GuestCount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(GuestCount::Number(n)) => Ok(Some(n)),
        Some(GuestCount::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(GuestCount::Text(s)) => s.trim().parse().map(Some).map_err(|_| {
            D::Error::custom(format!("number_of_guests must be an integer, got \"{}\"", s))
        }),
    }
}
