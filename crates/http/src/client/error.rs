//! Client error types

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

    /// Authentication failed (wrong password, unknown user)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Access denied, usually an expired or revoked access token
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The refresh token was rejected and the local session was dropped
    #[error("Session expired. Please login again")]
    SessionExpired,
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status carried by this error, if it came from a server response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Serialization(_) | Self::Configuration(_) | Self::SessionExpired => None,
        }
    }

    /// Whether the server refused the access token
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Whether the refresh endpoint rejected the refresh token itself
    ///
    /// The backend answers 400 for a malformed or missing token and 403 for
    /// an expired or revoked one.
    pub fn is_refresh_rejected(&self) -> bool {
        matches!(self, Self::BadRequest(_) | Self::Forbidden(_))
    }
}
