//! Plain-data responses and their resolution.
//!
//! Transports produce a [`Response`]; the executor resolves it into a
//! [`Resolved`] value (or an error) according to the status and, when
//! auto-parse is enabled, the declared content type.

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// An HTTP response as plain data, produced by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Status line reason phrase, when the transport saw one that differs
    /// from the canonical phrase for the code.
    pub reason: Option<String>,
}

impl Response {
    /// Create an empty response with the given status.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Attach a body (builder-style).
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a header (builder-style).
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Override the status line reason phrase (builder-style).
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether the status is in the 2xx success range.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// The status text: transport-supplied reason phrase, canonical phrase,
    /// or the bare numeric code as a last resort.
    #[must_use]
    pub fn status_text(&self) -> String {
        self.reason.clone().unwrap_or_else(|| {
            self.status
                .canonical_reason()
                .map_or_else(|| self.status.as_str().to_string(), str::to_string)
        })
    }

    /// The `Content-Type` header value, when present and readable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
    }

    /// Decode the body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyDecode`] on invalid UTF-8.
    pub fn text(&self) -> Result<String, Error> {
        Ok(String::from_utf8(self.body.clone())?)
    }

    /// Decode the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyParse`] when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::BodyParse)
    }
}

/// The outcome of a successful call.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// Auto-parsed JSON body (content type contained `"json"`).
    Json(Value),
    /// Auto-parsed text body (any other or missing content type).
    Text(String),
    /// The raw response, untouched, when auto-parse is disabled.
    Raw(Response),
}

impl Resolved {
    /// Deserialize the resolved value into `T`.
    ///
    /// Works for all three variants: decoded JSON converts directly, text
    /// and raw bodies are parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyParse`] when the value does not deserialize.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(Error::BodyParse),
            Self::Text(text) => serde_json::from_str(&text).map_err(Error::BodyParse),
            Self::Raw(response) => response.json(),
        }
    }

    /// The resolved value as text: decoded text as-is, JSON re-rendered
    /// compactly, raw bodies decoded as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyDecode`] when a raw body is not UTF-8.
    pub fn text(self) -> Result<String, Error> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Json(value) => Ok(value.to_string()),
            Self::Raw(response) => response.text(),
        }
    }

    /// Borrow the decoded JSON value, if that is what this resolved to.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the decoded text, if that is what this resolved to.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Take the raw response, if auto-parse was disabled.
    #[must_use]
    pub fn into_raw(self) -> Option<Response> {
        match self {
            Self::Raw(response) => Some(response),
            _ => None,
        }
    }
}

/// Resolve a transport response per the auto-parse rules.
///
/// Non-2xx statuses reject with the status text as the message, carrying the
/// numeric code and body text. Missing content types resolve as text rather
/// than failing.
pub(crate) fn resolve(response: Response, auto_parse: bool) -> Result<Resolved, Error> {
    if !response.ok() {
        let body = if response.body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&response.body).into_owned())
        };
        return Err(Error::Http {
            status: response.status,
            status_text: response.status_text(),
            body,
        });
    }

    if !auto_parse {
        return Ok(Resolved::Raw(response));
    }

    let is_json = response
        .content_type()
        .is_some_and(|content_type| content_type.contains("json"));

    if is_json {
        Ok(Resolved::Json(response.json()?))
    } else {
        Ok(Resolved::Text(response.text()?))
    }
}
