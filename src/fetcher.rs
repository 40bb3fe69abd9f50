//! Client handle, configuration, and the request pipeline.
//!
//! [`Fetcher`] is the handle: an immutable effective configuration (`base`,
//! `auto_parse`, optional `transform_request` hook) plus the injected
//! transport. Verb methods return a [`FetchBuilder`], a pending call that
//! assembles a fresh [`Request`] descriptor when awaited:
//!
//! 1. normalize the verb to upper case
//! 2. for `GET`, reinterpret object payloads as query parameters
//! 3. concatenate `base + url + query` (no slash normalization; the caller
//!    owns well-formedness)
//! 4. merge headers, default `Content-Type` first so per-call headers win
//! 5. apply the transform hook, dispatch, resolve
//!
//! Calls through one handle share nothing but the read-only configuration,
//! so any number may be in flight concurrently.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::{Extensions, HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

use crate::error::Error;
use crate::payload::{Payload, encode_pairs};
use crate::request::{Body, Request};
use crate::response::{Resolved, resolve};
use crate::transport::Transport;

/// Hook applied to every assembled descriptor before dispatch.
///
/// The single customization point for signing, logging, or header injection
/// not expressible through static configuration.
pub type TransformRequest = Arc<dyn Fn(Request) -> Request + Send + Sync>;

#[derive(Clone)]
struct Config {
    base: String,
    auto_parse: bool,
    transform_request: Option<TransformRequest>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: String::new(),
            auto_parse: true,
            transform_request: None,
        }
    }
}

/// Builder for a [`Fetcher`]'s effective configuration.
///
/// Absent fields take their documented defaults: `base = ""`,
/// `auto_parse = true`, no transform hook.
#[derive(Default)]
#[must_use]
pub struct FetcherBuilder {
    config: Config,
}

impl FetcherBuilder {
    /// Prefix concatenated before every call URL. Defaults to `""`.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.config.base = base.into();
        self
    }

    /// Whether successful responses are decoded by content type. Defaults to
    /// `true`; when disabled, calls resolve to the raw [`Response`](crate::Response).
    pub const fn auto_parse(mut self, enabled: bool) -> Self {
        self.config.auto_parse = enabled;
        self
    }

    /// Install a hook that may rewrite each assembled descriptor.
    pub fn transform_request(
        mut self,
        hook: impl Fn(Request) -> Request + Send + Sync + 'static,
    ) -> Self {
        self.config.transform_request = Some(Arc::new(hook));
        self
    }

    /// Bind the configuration to a transport, producing the client handle.
    pub fn build<T: Transport>(self, transport: T) -> Fetcher<T> {
        Fetcher {
            transport,
            config: self.config,
        }
    }
}

impl fmt::Debug for FetcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherBuilder")
            .field("base", &self.config.base)
            .field("auto_parse", &self.config.auto_parse)
            .field(
                "transform_request",
                &self.config.transform_request.is_some(),
            )
            .finish()
    }
}

/// An HTTP client handle: immutable configuration plus a transport.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), fetchkit::Error> {
/// use fetchkit::{Fetcher, Request, Response};
///
/// async fn fetch(request: Request) -> Result<Response, fetchkit::Error> {
///     // hand the descriptor to the HTTP stack of your choice
///     # let _ = request;
///     # Ok(Response::new(http::StatusCode::OK))
/// }
///
/// let api = Fetcher::builder().base("https://foo.bar/").build(fetch);
/// let names: Vec<String> = api.get("json").await?.json()?;
/// # Ok(())
/// # }
/// ```
pub struct Fetcher<T> {
    transport: T,
    config: Config,
}

impl Fetcher<()> {
    /// Start configuring a handle.
    pub fn builder() -> FetcherBuilder {
        FetcherBuilder::default()
    }
}

impl<T: Transport> Fetcher<T> {
    /// Create a handle with the default configuration.
    pub fn new(transport: T) -> Self {
        FetcherBuilder::default().build(transport)
    }

    /// The configured URL prefix.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.config.base
    }

    /// Whether successful responses are decoded by content type.
    #[must_use]
    pub const fn auto_parse(&self) -> bool {
        self.config.auto_parse
    }

    /// The configured transform hook, if any.
    #[must_use]
    pub const fn transform_request(&self) -> Option<&TransformRequest> {
        self.config.transform_request.as_ref()
    }

    /// Begin a call with a typed method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> FetchBuilder<'_, T> {
        FetchBuilder {
            fetcher: self,
            method,
            url: url.into(),
            payload: None,
            headers: HeaderMap::new(),
            extensions: Extensions::new(),
            deferred: None,
        }
    }

    /// Begin a call with an arbitrary verb token, upper-cased.
    ///
    /// Any token is accepted here; an invalid one fails when the call is
    /// awaited, so verb lookup itself is total.
    pub fn verb(&self, verb: &str, url: impl Into<String>) -> FetchBuilder<'_, T> {
        match Method::from_bytes(verb.to_ascii_uppercase().as_bytes()) {
            Ok(method) => self.request(method, url),
            Err(_) => {
                let mut pending = self.request(Method::GET, url);
                pending.deferred = Some(Error::InvalidRequest(format!(
                    "invalid method token: {verb:?}"
                )));
                pending
            }
        }
    }

    /// Begin a `GET` call.
    pub fn get(&self, url: impl Into<String>) -> FetchBuilder<'_, T> {
        self.request(Method::GET, url)
    }

    /// Begin a `POST` call.
    pub fn post(&self, url: impl Into<String>) -> FetchBuilder<'_, T> {
        self.request(Method::POST, url)
    }

    /// Begin a `PUT` call.
    pub fn put(&self, url: impl Into<String>) -> FetchBuilder<'_, T> {
        self.request(Method::PUT, url)
    }

    /// Begin a `DELETE` call.
    pub fn delete(&self, url: impl Into<String>) -> FetchBuilder<'_, T> {
        self.request(Method::DELETE, url)
    }

    /// Begin a `PATCH` call.
    pub fn patch(&self, url: impl Into<String>) -> FetchBuilder<'_, T> {
        self.request(Method::PATCH, url)
    }
}

impl<T: Transport + Clone> Clone for Fetcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T: Transport> fmt::Debug for Fetcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("base", &self.config.base)
            .field("auto_parse", &self.config.auto_parse)
            .field(
                "transform_request",
                &self.config.transform_request.is_some(),
            )
            .finish_non_exhaustive()
    }
}

/// A pending call: verb, URL, and per-call overrides gathered before send.
///
/// Awaiting the builder (or calling [`send`](Self::send)) assembles the
/// descriptor and dispatches it. Per-call headers merge over the default
/// `Content-Type`; extensions pass through to the transport untouched.
#[must_use = "a pending request does nothing until awaited"]
pub struct FetchBuilder<'a, T: Transport> {
    fetcher: &'a Fetcher<T>,
    method: Method,
    url: String,
    payload: Option<Payload>,
    headers: HeaderMap,
    extensions: Extensions,
    deferred: Option<Error>,
}

impl<T: Transport> FetchBuilder<'_, T> {
    /// Attach a payload: a JSON value, query pairs, or form-data.
    pub fn payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Serialize arbitrary data as the JSON payload.
    ///
    /// A serialization failure is deferred and surfaces when the call is
    /// awaited, as [`Error::Serialize`].
    pub fn json<S: Serialize + ?Sized>(mut self, value: &S) -> Self {
        match Payload::json(value) {
            Ok(payload) => self.payload = Some(payload),
            Err(err) => {
                self.deferred.get_or_insert(err);
            }
        }
        self
    }

    /// Add one header. Invalid names or values fail when awaited.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => {
                self.deferred.get_or_insert(Error::InvalidRequest(format!(
                    "invalid header: {name}: {value}"
                )));
            }
        }
        self
    }

    /// Merge a prepared header map over the defaults.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Attach an opaque per-call option for the transport (abort handles,
    /// deadlines, tracing spans, whatever the transport understands).
    pub fn extension<E: Clone + Send + Sync + 'static>(mut self, value: E) -> Self {
        self.extensions.insert(value);
        self
    }

    /// Assemble the descriptor, dispatch it, and resolve the response.
    ///
    /// # Errors
    ///
    /// Any deferred construction error, transport failure, HTTP error
    /// status, or body decoding failure.
    pub async fn send(self) -> Result<Resolved, Error> {
        let Self {
            fetcher,
            method,
            url,
            mut payload,
            headers,
            extensions,
            deferred,
        } = self;

        if let Some(err) = deferred {
            return Err(err);
        }

        // Only GET reinterprets payloads as query parameters, and only
        // object-shaped ones; the payload must not also become a body.
        let mut query = None;
        if method == Method::GET
            && let Some(converted) = payload.as_ref().and_then(Payload::as_query_string)
        {
            query = Some(converted);
            payload = None;
        }

        let mut full_url = format!("{}{url}", fetcher.config.base);
        if let Some(query) = query {
            full_url.push('?');
            full_url.push_str(&query);
        }

        let (body, default_content_type) = assemble_body(payload)?;

        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, default_content_type);
        merged.extend(headers);

        let mut request = Request {
            url: full_url,
            method,
            headers: merged,
            body,
            extensions,
        };

        if let Some(hook) = &fetcher.config.transform_request {
            request = hook(request);
        }

        let response = fetcher.transport.send(request).await?;
        resolve(response, fetcher.config.auto_parse)
    }
}

impl<'a, T: Transport> IntoFuture for FetchBuilder<'a, T> {
    type Output = Result<Resolved, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

impl<T: Transport> fmt::Debug for FetchBuilder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchBuilder")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("payload", &self.payload)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Serialize the remaining payload into a body plus the default content type
/// the descriptor starts from.
fn assemble_body(payload: Option<Payload>) -> Result<(Body, HeaderValue), Error> {
    const JSON: HeaderValue = HeaderValue::from_static("application/json");

    match payload {
        // Absent payload means no body at all, not the JSON text "undefined".
        None => Ok((Body::Empty, JSON)),
        Some(Payload::Json(value)) => Ok((Body::Text(value.to_string()), JSON)),
        // Query pairs on a non-GET verb become an urlencoded body, which is
        // what a fetch primitive does with a URLSearchParams body. The
        // default content type stays application/json; override per call if
        // the server insists on the urlencoded one.
        Some(Payload::Query(pairs)) => Ok((
            Body::Text(encode_pairs(
                pairs.iter().map(|(key, value)| (key.as_str(), value.clone())),
            )),
            JSON,
        )),
        Some(Payload::Form(mut form)) => {
            let boundary = form.ensure_boundary().to_string();
            let content_type =
                HeaderValue::try_from(format!("multipart/form-data; boundary={boundary}"))
                    .map_err(|_| {
                        Error::InvalidRequest(format!("invalid form boundary: {boundary:?}"))
                    })?;
            Ok((Body::Form(form), content_type))
        }
    }
}
