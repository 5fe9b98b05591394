//! Client error types

use sanctum_core::TransportError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The anti-forgery token was missing or stale (Laravel answers 419)
    #[error("CSRF token mismatch: {0}")]
    CsrfTokenMismatch(String),

    /// Input failed server-side validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            419 => Self::CsrfTokenMismatch(message),
            422 => Self::Validation(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status of the failed response, if the server answered
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::CsrfTokenMismatch(_) => Some(419),
            Self::Validation(_) => Some(422),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(_) | Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }
}

impl From<ClientError> for TransportError {
    fn from(err: ClientError) -> Self {
        if let Some(status) = err.status() {
            return Self::Rejected {
                status,
                message: err.to_string(),
            };
        }

        match err {
            ClientError::Request(e) if e.is_decode() => Self::Decode(e.to_string()),
            ClientError::Request(e) => Self::Network(e.to_string()),
            ClientError::Serialization(e) => Self::Decode(e.to_string()),
            ClientError::Configuration(message) => Self::Configuration(message),
            other => Self::Network(other.to_string()),
        }
    }
}

/// Pull a readable message out of an error body
///
/// Laravel answers with `{"message": "...", "errors": {...}}`; anything else
/// is passed through, falling back to the status text for empty bodies.
pub(crate) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(serde_json::Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }

    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn maps_laravel_statuses() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            ClientError::Validation(_)
        ));
        let mismatch = ClientError::from_status(StatusCode::from_u16(419).unwrap(), "x".into());
        assert!(matches!(mismatch, ClientError::CsrfTokenMismatch(_)));
        assert_eq!(mismatch.status(), Some(419));

        let server = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into());
        assert_eq!(server.status(), Some(502));
    }

    #[test]
    fn rejections_become_transport_rejections() {
        let err: TransportError = ClientError::AuthenticationFailed("nope".into()).into();
        assert_eq!(err.status(), Some(401));

        let err: TransportError = ClientError::Configuration("bad header".into()).into();
        assert_eq!(err, TransportError::Configuration("bad header".into()));
    }

    #[test]
    fn error_message_prefers_laravel_message_field() {
        let body = r#"{"message":"These credentials do not match our records.","errors":{"email":["..."]}}"#;
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, body),
            "These credentials do not match our records."
        );
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, "Unauthorized"), "Unauthorized");
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "500 Internal Server Error"
        );
    }
}
