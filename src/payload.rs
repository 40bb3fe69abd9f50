//! Call payloads and their interpretation.
//!
//! A [`Payload`] is what the caller wants to send: any JSON value, a
//! pre-built list of query pairs, or a form-data container. Interpretation
//! depends on the verb: `GET` reinterprets objects and query pairs as URL
//! query parameters, everything else serializes into the request body.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::Error;
use crate::form::FormData;

/// Data attached to a call.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Any JSON value: string, number, bool, array, object, null.
    Json(Value),
    /// A pre-built query-parameter container, used verbatim on `GET` and
    /// sent as an urlencoded body on any other verb.
    Query(Vec<(String, String)>),
    /// Binary form-data, passed through unserialized.
    Form(FormData),
}

impl Payload {
    /// Serialize arbitrary data into a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] when `value` cannot be represented as
    /// JSON (non-string map keys, non-finite floats inside custom types).
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        Ok(Self::Json(
            serde_json::to_value(value).map_err(Error::Serialize)?,
        ))
    }

    /// Build a query-pair payload from anything yielding key/value pairs.
    #[must_use]
    pub fn query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Query(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// The query-string rendition of this payload, for GET calls.
    ///
    /// Only JSON *objects* and explicit query containers convert; strings,
    /// numbers, arrays and form-data never do and stay in the body.
    pub(crate) fn as_query_string(&self) -> Option<String> {
        match self {
            Self::Json(Value::Object(map)) => Some(encode_pairs(
                map.iter().map(|(key, value)| (key.as_str(), query_value(value))),
            )),
            Self::Query(pairs) => Some(encode_pairs(
                pairs.iter().map(|(key, value)| (key.as_str(), value.clone())),
            )),
            _ => None,
        }
    }
}

/// Encode pairs as `application/x-www-form-urlencoded` (space as `+`).
pub(crate) fn encode_pairs<'a>(
    pairs: impl IntoIterator<Item = (&'a str, String)>,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        query.append_pair(key, &value);
    }
    query.finish()
}

/// Stringify a JSON value the way a query parameter expects: strings keep
/// their text, everything else renders as compact JSON.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u64> for Payload {
    fn from(value: u64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<Vec<(String, String)>> for Payload {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::Query(pairs)
    }
}

impl From<FormData> for Payload {
    fn from(form: FormData) -> Self {
        Self::Form(form)
    }
}
