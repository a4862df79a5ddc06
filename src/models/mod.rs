//! Data models for the booking API wire format.
//!
//! - `Room`: bookable room identified by its ref
//! - `TimeInterval`: availability/slot time range
//! - `Reservation`: a booked interval tied to a room and user
//! - Response wrappers matching the server's JSON envelopes

pub mod booking;

pub use booking::{
    AvailabilitiesResponse, Reservation, ReservationsResponse, Room, RoomsResponse, SlotsResponse,
    TimeInterval,
};
