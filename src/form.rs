//! Form-data payload container.
//!
//! [`FormData`] is the binary payload variant: unlike JSON payloads it is
//! never stringified and never reinterpreted as query parameters. It travels
//! through the request descriptor as-is and is encoded to
//! `multipart/form-data` bytes at the transport boundary.

use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single field of a form-data payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    name: Cow<'static, str>,
    filename: Option<Cow<'static, str>>,
    content_type: Option<Cow<'static, str>>,
    data: Vec<u8>,
}

impl FormPart {
    /// Create a field with raw bytes.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: data.into(),
        }
    }

    /// Create a text field using UTF-8 content.
    #[must_use]
    pub fn text(name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(name, value.into().into_bytes())
    }

    /// Create a binary field with filename and content type metadata.
    #[must_use]
    pub fn binary(
        name: impl Into<Cow<'static, str>>,
        filename: impl Into<Cow<'static, str>>,
        content_type: impl Into<Cow<'static, str>>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            data,
        }
    }

    /// Attach/override the filename metadata.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<Cow<'static, str>>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Attach/override the content type metadata.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<Cow<'static, str>>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Builder-style container for form-data payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    boundary: Option<String>,
    parts: Vec<FormPart>,
}

impl FormData {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the boundary string (otherwise auto-generated at dispatch).
    #[must_use]
    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    /// Add a field (builder-style).
    #[must_use]
    pub fn with_part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Push a field into the container.
    pub fn push(&mut self, part: FormPart) {
        self.parts.push(part);
    }

    /// Whether the container holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The boundary string, generating and pinning one if not yet set.
    ///
    /// The executor calls this while assembling the descriptor so the
    /// `Content-Type` header and the encoded body agree on the boundary.
    pub fn ensure_boundary(&mut self) -> &str {
        self.boundary.get_or_insert_with(default_boundary).as_str()
    }

    /// Encode the fields into a `multipart/form-data` body using `boundary`.
    #[must_use]
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut body = Vec::new();

        for part in &self.parts {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"{}\r\n",
                    part.name,
                    part.filename
                        .as_ref()
                        .map(|name| format!("; filename=\"{name}\""))
                        .unwrap_or_default()
                )
                .as_bytes(),
            );
            if let Some(content_type) = &part.content_type {
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(&part.data);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }
}

fn default_boundary() -> String {
    format!("fetchkit-{:#x}", monotonic_suffix())
}

fn monotonic_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_micros())
}
