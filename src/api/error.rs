use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Classified failure reason for a non-success API response.
///
/// The mapping is closed: every status outside the known set falls
/// through to `Unknown`, classification itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    AuthenticationRequired,
    PermissionDenied,
    NotFound,
    Conflict,
    Unknown,
}

impl ErrorKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::AuthenticationRequired,
            403 => ErrorKind::PermissionDenied,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            _ => ErrorKind::Unknown,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad request",
            ErrorKind::AuthenticationRequired => "Authentication required",
            ErrorKind::PermissionDenied => "Permission denied",
            ErrorKind::NotFound => "Not found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Unknown => "An error occurred while fetching the data.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error built at the HTTP boundary for a non-2xx response.
///
/// Carries the original status and, when the server sent a parseable JSON
/// body, that body verbatim as `server_info`. Never mutated after
/// construction.
#[derive(Debug, Error)]
#[error("{kind} (status {status})")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: u16,
    pub server_info: Option<serde_json::Value>,
}

impl ApiError {
    /// Build an error from a response status and raw body text.
    ///
    /// The body is attached as `server_info` when it parses as JSON;
    /// an unparsable body yields `server_info: None` rather than a
    /// secondary parse failure.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        Self {
            kind: ErrorKind::from_status(status.as_u16()),
            status: status.as_u16(),
            server_info: serde_json::from_str(body).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_statuses() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::AuthenticationRequired);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::PermissionDenied);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
    }

    #[test]
    fn test_classify_unknown_statuses() {
        assert_eq!(ErrorKind::from_status(418), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(200), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(0), ErrorKind::Unknown);
    }

    #[test]
    fn test_from_response_attaches_json_body() {
        let body = r#"{"code":"room_taken","detail":"Room already reserved"}"#;
        let err = ApiError::from_response(StatusCode::CONFLICT, body);
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.status, 409);
        assert_eq!(
            err.server_info,
            Some(serde_json::json!({
                "code": "room_taken",
                "detail": "Room already reserved"
            }))
        );
    }

    #[test]
    fn test_from_response_unparsable_body() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "<html>502</html>");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.status, 502);
        assert_eq!(err.server_info, None);
    }

    #[test]
    fn test_display_messages() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, "{}");
        assert_eq!(err.to_string(), "Authentication required (status 401)");
        assert_eq!(
            ErrorKind::Unknown.to_string(),
            "An error occurred while fetching the data."
        );
    }
}
