//! Wire-level request descriptor.
//!
//! A [`Request`] is plain data: the executor assembles one per call and the
//! injected [`Transport`](crate::Transport) consumes it. Nothing here touches
//! the network. The `transform_request` hook receives the full descriptor and
//! may rewrite any field, so everything is public.

use http::{Extensions, HeaderMap, Method};

use crate::form::FormData;

/// The request descriptor handed to the transport.
///
/// Constructed fresh for every call, never reused. `extensions` carries
/// transport-specific options (abort signals, deadlines, ...) that this layer
/// passes through untouched.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Fully assembled URL: `base + url + query`.
    pub url: String,
    /// Upper-cased HTTP method token.
    pub method: Method,
    /// Merged headers; the default `Content-Type` is injected before
    /// per-call headers so callers can override it.
    pub headers: HeaderMap,
    /// Serialized payload, or a form-data container passed through as-is.
    pub body: Body,
    /// Opaque per-call options for the transport.
    pub extensions: Extensions,
}

/// Request body variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No body. An absent payload produces this, not the JSON text
    /// `"undefined"` of some fetch wrappers.
    #[default]
    Empty,
    /// Serialized text body (JSON or urlencoded pairs).
    Text(String),
    /// Form-data container, encoded at the transport boundary.
    Form(FormData),
}

impl Body {
    /// Whether there is nothing to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The body as text, when it is a serialized text body.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Encode the body to raw bytes for dispatch.
    ///
    /// Form-data encodes with its pinned boundary, which the executor also
    /// advertises in the `Content-Type` header while assembling the
    /// descriptor, so header and body always agree.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Empty => Vec::new(),
            Self::Text(text) => text.into_bytes(),
            Self::Form(mut form) => {
                let boundary = form.ensure_boundary().to_string();
                form.encode(&boundary)
            }
        }
    }
}
