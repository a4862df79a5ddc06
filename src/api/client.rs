//! HTTP client for the room booking API.
//!
//! This module provides the `ApiClient` struct for making requests against
//! the booking backend. An unauthenticated client serves the auth endpoints;
//! `with_token` derives the authenticated variant used for all resource
//! reads after login.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{
    AvailabilitiesResponse, Reservation, ReservationsResponse, Room, RoomsResponse, SlotsResponse,
    TimeInterval,
};

use super::ApiError;

/// API client for the booking backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new unauthenticated client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Create a new ApiClient bound to the given bearer token, sharing the
    /// connection pool. Every request made through the returned client
    /// carries the raw token in the `Authorization` header.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    /// The bearer token this client is bound to, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Cache identity for a request to `path` through this client.
    ///
    /// The authenticated variant appends `#<token>` so that a deduplication
    /// layer above never serves one identity's response to another. The
    /// suffix is a key transformation only; the path sent on the wire is
    /// unchanged.
    pub fn cache_key(&self, path: &str) -> String {
        match &self.token {
            Some(token) => format!("{}#{}", path, token),
            None => path.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            // Raw token, no scheme prefix
            headers.insert(header::AUTHORIZATION, header::HeaderValue::from_str(token)?);
        }
        Ok(headers)
    }

    /// Check if a response is successful, building a classified error if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "API request failed");
            Err(ApiError::from_response(status, &body).into())
        }
    }

    /// Perform a GET request and parse the response body as JSON.
    ///
    /// Exactly one network round trip; no retries. A parse failure on a
    /// success response propagates as-is, distinct from `ApiError`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// Perform a POST request and parse the response body as JSON.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self.post_raw(path, body).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// Perform a POST request, returning the checked response without
    /// consuming the body. The authentication flow uses this to read the
    /// token from the `Authorization` response header.
    pub(crate) async fn post_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        Self::check_response(response).await
    }

    /// Perform a DELETE request, expecting no response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Booking Endpoints =====

    /// Fetch the list of bookable rooms.
    pub async fn fetch_rooms(&self) -> Result<Vec<Room>> {
        let response: RoomsResponse = self.get("/booking/rooms").await?;
        Ok(response.rooms)
    }

    /// Fetch free slots across all rooms within a time range.
    pub async fn fetch_slots(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        duration_minutes: Option<i64>,
    ) -> Result<Vec<TimeInterval>> {
        let path = format!(
            "/booking/rooms/availabilities{}",
            range_query(from, to, duration_minutes)
        );
        let response: SlotsResponse = self.get(&path).await?;
        Ok(response.slots)
    }

    /// Fetch availabilities for a single room within a time range.
    pub async fn fetch_room_availabilities(
        &self,
        room_ref: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        duration_minutes: Option<i64>,
    ) -> Result<Vec<TimeInterval>> {
        let path = format!(
            "/booking/rooms/{}/availabilities{}",
            room_ref,
            range_query(from, to, duration_minutes)
        );
        let response: AvailabilitiesResponse = self.get(&path).await?;
        Ok(response.availabilities)
    }

    /// Fetch reservations for a single room.
    pub async fn fetch_room_reservations(&self, room_ref: &str) -> Result<Vec<Reservation>> {
        let path = format!("/booking/rooms/{}/reservations", room_ref);
        let response: ReservationsResponse = self.get(&path).await?;
        Ok(response.reservations)
    }

    /// Reserve a room for a number of hours starting at `from`.
    pub async fn reserve_room(
        &self,
        room_ref: &str,
        from: DateTime<Utc>,
        hours: i64,
    ) -> Result<Reservation> {
        let path = format!("/booking/rooms/{}/reservations", room_ref);
        let body = ReserveRoomRequest { from, hours };
        self.post(&path, &body).await
    }

    /// Cancel a reservation.
    pub async fn cancel_reservation(&self, room_ref: &str, reservation_id: &str) -> Result<()> {
        let path = format!("/booking/rooms/{}/reservations/{}", room_ref, reservation_id);
        self.delete(&path).await
    }
}

/// Build the `?from=..&to=..[&duration=..]` query suffix for availability
/// searches. Timestamps are RFC 3339 with a `Z` suffix, which keeps them
/// free of characters needing percent-encoding.
fn range_query(from: DateTime<Utc>, to: DateTime<Utc>, duration_minutes: Option<i64>) -> String {
    let mut query = format!(
        "?from={}&to={}",
        from.to_rfc3339_opts(SecondsFormat::Secs, true),
        to.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    if let Some(minutes) = duration_minutes {
        query.push_str(&format!("&duration={}", minutes));
    }
    query
}

// Internal request types

#[derive(Debug, Serialize)]
struct ReserveRoomRequest {
    from: DateTime<Utc>,
    hours: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;
    use chrono::TimeZone;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_cache_key_unauthenticated() {
        let client = ApiClient::new("http://localhost:8484");
        assert_eq!(client.cache_key("/booking/rooms"), "/booking/rooms");
    }

    #[test]
    fn test_cache_key_authenticated() {
        let client = ApiClient::new("http://localhost:8484").with_token("tok-xyz");
        assert_eq!(client.cache_key("/booking/rooms"), "/booking/rooms#tok-xyz");
    }

    #[test]
    fn test_cache_key_distinct_per_token() {
        let base = ApiClient::new("http://localhost:8484");
        let a = base.with_token("tok-a");
        let b = base.with_token("tok-b");
        assert_ne!(a.cache_key("/booking/rooms"), b.cache_key("/booking/rooms"));
        // Same token, same path, same key
        assert_eq!(
            a.cache_key("/booking/rooms"),
            base.with_token("tok-a").cache_key("/booking/rooms")
        );
    }

    #[test]
    fn test_with_token_replaces_token() {
        let client = ApiClient::new("http://localhost:8484").with_token("old");
        let rebound = client.with_token("new");
        assert_eq!(rebound.token(), Some("new"));
        assert_eq!(client.token(), Some("old"));
    }

    #[test]
    fn test_url_resolution_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8484/");
        assert_eq!(client.url("/booking/rooms"), "http://localhost:8484/booking/rooms");
    }

    #[test]
    fn test_range_query_format() {
        let from = Utc.with_ymd_and_hms(2021, 6, 1, 9, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2021, 6, 8, 9, 0, 0).unwrap();
        assert_eq!(
            range_query(from, to, None),
            "?from=2021-06-01T09:00:00Z&to=2021-06-08T09:00:00Z"
        );
        assert_eq!(
            range_query(from, to, Some(30)),
            "?from=2021-06-01T09:00:00Z&to=2021-06-08T09:00:00Z&duration=30"
        );
    }

    #[tokio::test]
    async fn test_get_returns_parsed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/booking/rooms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "rooms": [{"ref": "101"}, {"ref": "102"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let rooms = client.fetch_rooms().await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room_ref, "101");
    }

    #[tokio::test]
    async fn test_authenticated_request_sends_raw_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/booking/rooms"))
            .and(header("Authorization", "tok-xyz"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"rooms": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("tok-xyz");
        client.fetch_rooms().await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_yields_api_error_with_server_info() {
        let server = MockServer::start().await;
        let info = serde_json::json!({"reason": "room is gone"});
        Mock::given(method("GET"))
            .and(path("/booking/rooms"))
            .respond_with(ResponseTemplate::new(404).set_body_json(info.clone()))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.fetch_rooms().await.unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().expect("expected ApiError");
        assert_eq!(api_err.kind, ErrorKind::NotFound);
        assert_eq!(api_err.status, 404);
        assert_eq!(api_err.server_info, Some(info));
    }

    #[tokio::test]
    async fn test_unknown_status_classified_as_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/booking/rooms"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.fetch_rooms().await.unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().expect("expected ApiError");
        assert_eq!(api_err.kind, ErrorKind::Unknown);
        assert_eq!(api_err.server_info, None);
    }

    #[tokio::test]
    async fn test_fetch_room_availabilities_sends_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/booking/rooms/101/availabilities"))
            .and(query_param("from", "2021-06-01T09:00:00Z"))
            .and(query_param("to", "2021-06-08T09:00:00Z"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "availabilities": [
                    {"from": "2021-06-02T09:00:00Z", "to": "2021-06-02T17:00:00Z"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let from = Utc.with_ymd_and_hms(2021, 6, 1, 9, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2021, 6, 8, 9, 0, 0).unwrap();
        let availabilities = client
            .fetch_room_availabilities("101", from, to, None)
            .await
            .unwrap();
        assert_eq!(availabilities.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_reservation_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/booking/rooms/101/reservations/res-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token("tok-xyz");
        client.cancel_reservation("101", "res-1").await.unwrap();
    }
}
