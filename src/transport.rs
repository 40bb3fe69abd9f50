//! The transport seam.
//!
//! fetchkit does not speak TCP, TLS, or HTTP framing; it builds request
//! descriptors and resolves responses. The actual round-trip belongs to a
//! host-supplied [`Transport`]: a hyper client, a blocking agent on a
//! thread, a browser fetch binding, or a test double.

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// A fetch-like primitive that executes one wire-level request.
///
/// Implementations must not interpret the body or headers beyond what the
/// wire format requires; failure of the round-trip itself is reported
/// through the returned error and propagates to the caller unchanged.
///
/// Any `Fn(Request) -> impl Future<Output = Result<Response, Error>>`
/// closure is a transport, so hosts can inject a plain async function:
///
/// ```rust
/// use fetchkit::{Fetcher, Request, Response};
/// use http::StatusCode;
///
/// async fn fake(_request: Request) -> Result<Response, fetchkit::Error> {
///     Ok(Response::new(StatusCode::NO_CONTENT))
/// }
///
/// let api = Fetcher::new(fake);
/// ```
pub trait Transport: Send + Sync {
    /// Execute the request and produce a plain-data response.
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send;
}

impl<F, Fut> Transport for F
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, Error>> + Send,
{
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send {
        self(request)
    }
}
