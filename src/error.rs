//! Unified error type for fetchkit.
//!
//! Everything a call can fail with lands in one [`Error`] enum:
//! - HTTP error responses (non-2xx status)
//! - transport failures surfaced by the injected [`Transport`](crate::Transport)
//! - payload serialization failures
//! - response body decoding failures
//!
//! No retries, no local recovery: every failure is reported to the caller
//! as-is. For HTTP errors the `Display` message is exactly the response's
//! status text, while the numeric status code and the body text ride along
//! for callers that want richer handling.

use std::error::Error as StdError;
use std::string::FromUtf8Error;

use http::StatusCode;
use thiserror::Error;

/// Unified error type for all fetchkit operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The server returned a non-2xx response.
    ///
    /// The message is the status reason phrase (e.g. `"Bad Request"`); the
    /// numeric code and the response body text are attached for inspection.
    #[error("{status_text}")]
    Http {
        /// HTTP status code.
        status: StatusCode,
        /// Status line reason phrase.
        status_text: String,
        /// Response body as text, when present and UTF-8.
        body: Option<String>,
    },

    /// The underlying transport failed (connection refused, DNS, abort, ...).
    ///
    /// The source error is passed through unchanged from the transport.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request payload: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body could not be parsed as JSON.
    #[error("failed to parse response body: {0}")]
    BodyParse(#[source] serde_json::Error),

    /// The response body is not valid UTF-8 text.
    #[error("response body is not valid UTF-8: {0}")]
    BodyDecode(#[from] FromUtf8Error),

    /// Request construction failed (invalid verb token, header, boundary).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Wrap a transport-level failure.
    pub fn transport(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }

    /// The HTTP status code, if this is an HTTP error response.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx HTTP status).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if status.is_client_error())
    }

    /// Check if this is a server error (5xx HTTP status).
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if status.is_server_error())
    }

    /// The response body text, if this is an HTTP error that carried one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Attempt to deserialize the HTTP error response body as a specific type.
    ///
    /// Useful for APIs that return structured error responses alongside an
    /// error status code. Returns `None` when this is not an HTTP error or
    /// the body does not parse as `T`.
    pub fn deserialize_http_error<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::Http { body, .. } => body
                .as_ref()
                .and_then(|text| serde_json::from_str(text).ok()),
            _ => None,
        }
    }

    /// Get the error category, for logging and matching.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Http { .. } => ErrorKind::Http,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Serialize(_) => ErrorKind::Serialize,
            Self::BodyParse(_) | Self::BodyDecode(_) => ErrorKind::BodyParse,
            Self::InvalidRequest(_) => ErrorKind::Request,
        }
    }
}

/// Error category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP error response from the server.
    Http,
    /// Transport/network failure.
    Transport,
    /// Payload serialization failure.
    Serialize,
    /// Response body decoding failure.
    BodyParse,
    /// Request construction failure.
    Request,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Transport => write!(f, "transport"),
            Self::Serialize => write!(f, "serialize"),
            Self::BodyParse => write!(f, "body_parse"),
            Self::Request => write!(f, "request"),
        }
    }
}
