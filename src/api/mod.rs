//! HTTP client module for the room booking API.
//!
//! This module provides the `ApiClient` for talking to the booking backend
//! and the error taxonomy applied to non-success responses.
//!
//! Authenticated requests carry the raw bearer token in the `Authorization`
//! header, obtained through the wallet challenge/response flow in `auth`.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
