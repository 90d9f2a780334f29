//! Error types for Tailscale API operations.
//!
//! [`Error`] is the single error type returned by every operation. Failures
//! reported by the remote API (or by the connection to it) surface as
//! [`Error::Api`], which carries the HTTP status code and the parsed error body
//! when one is available. Callers distinguish not-found, permission and
//! validation failures by inspecting [`Error::status_code`].

use serde_json::Value;
use thiserror::Error;

/// Main error type for Tailscale API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The API rejected the request or could not be reached
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response could not be decoded into the expected type
    #[error("Failed to decode {target}: {message}")]
    Decode {
        /// Name of the type being decoded
        target: &'static str,
        /// Decoder error message
        message: String,
    },

    /// A request body could not be encoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Tailscale API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the Tailscale API or by the HTTP transport.
///
/// `status_code` is `None` when no HTTP response was received (DNS failure,
/// refused connection, timeout) or when a successful response carried a body
/// that was not valid JSON. `payload` holds the error body only when it parsed
/// as JSON.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description of the failure
    pub message: String,
    /// HTTP status code, when a response was received
    pub status_code: Option<u16>,
    /// Parsed JSON error body
    pub payload: Option<Value>,
}

impl ApiError {
    /// Error for a non-success HTTP response.
    #[must_use]
    pub fn status(status_code: u16, message: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            message: message.into(),
            status_code: Some(status_code),
            payload,
        }
    }

    /// Error raised before or without a usable HTTP response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            payload: None,
        }
    }

    /// HTTP status code, when a response was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Parsed JSON error body.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Api(_) => "API_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// HTTP status code of an API error, if a response was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code,
            _ => None,
        }
    }

    /// Parsed JSON body of an API error response.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Api(err) => err.payload.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn decode(target: &'static str, err: &serde_json::Error) -> Self {
        Self::Decode {
            target,
            message: err.to_string(),
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Api(ApiError::transport(format!("Request failed: {err}")))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::Api(ApiError::transport("boom")).error_code(),
            "API_ERROR"
        );
        assert_eq!(
            Error::Decode {
                target: "Device",
                message: "missing field".to_string()
            }
            .error_code(),
            "DECODE_ERROR"
        );
        assert_eq!(
            Error::InvalidRequest("test".to_string()).error_code(),
            "INVALID_REQUEST"
        );
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::Api(ApiError::status(404, "API request failed: 404 Not Found", None));
        assert_eq!(err.to_string(), "API request failed: 404 Not Found");

        let err = Error::Decode {
            target: "User",
            message: "missing field `loginName`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode User: missing field `loginName`"
        );
    }

    #[test]
    fn test_status_and_payload_accessors() {
        let err = Error::Api(ApiError::status(
            403,
            "forbidden",
            Some(json!({"message": "forbidden"})),
        ));
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.payload(), Some(&json!({"message": "forbidden"})));

        let err = Error::Api(ApiError::transport("connection refused"));
        assert_eq!(err.status_code(), None);
        assert!(err.payload().is_none());

        let err = Error::ConfigError("bad".to_string());
        assert_eq!(err.status_code(), None);
        assert!(err.payload().is_none());
    }

    #[test]
    fn test_api_error_accessors() {
        let api = ApiError::status(404, "not found", Some(json!({"message": "not found"})));
        assert_eq!(api.status_code(), Some(404));
        assert_eq!(api.payload(), Some(&json!({"message": "not found"})));

        let api = ApiError::transport("timed out");
        assert_eq!(api.status_code(), None);
        assert!(api.payload().is_none());

        let err = Error::from(ApiError::status(409, "conflict", None));
        match err {
            Error::Api(inner) => assert_eq!(inner.status_code(), Some(409)),
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors_become_config_error() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("base_url", validator::ValidationError::new("url"));
        let err: Error = errors.into();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let api_err: Error = err.into();
        assert!(matches!(api_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_decode_error_keeps_target() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let decoded = Error::decode("u32", &err);
        assert!(matches!(decoded, Error::Decode { target: "u32", .. }));
    }

    #[test]
    fn test_error_partial_eq() {
        let err1 = Error::Api(ApiError::status(404, "missing", None));
        let err2 = Error::Api(ApiError::status(404, "missing", None));
        let err3 = Error::Api(ApiError::status(500, "missing", None));

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
