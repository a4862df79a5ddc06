// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "ref")]
    pub room_ref: String,
}

/// Half-open time range used for availabilities and free slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(rename = "roomRef")]
    pub room_ref: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomsResponse {
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilitiesResponse {
    #[serde(default)]
    pub availabilities: Vec<TimeInterval>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotsResponse {
    #[serde(default)]
    pub slots: Vec<TimeInterval>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReservationsResponse {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}
