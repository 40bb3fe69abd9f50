//! # Tiny JSON-first HTTP client layer
//! Fetchkit wraps a pluggable transport primitive with ergonomic
//! method-style calls and automatic JSON handling:
//! - `get` / `post` / `put` / `delete` / `patch`, plus arbitrary verbs
//! - JSON payload encoding; `GET` object payloads become query parameters
//! - responses decoded by content type, or returned raw on demand
//! - a per-client `transform_request` hook for signing and header injection
//!
//! It is deliberately a thin glue layer: no connection management, retries,
//! caching, or TLS. The wire round-trip belongs to whatever [`Transport`]
//! the host injects.
//!
//! # Quick start
//! ```rust,no_run
//! # async fn example() -> Result<(), fetchkit::Error> {
//! use fetchkit::{Fetcher, Request, Response};
//!
//! async fn fetch(request: Request) -> Result<Response, fetchkit::Error> {
//!     // execute the descriptor with your HTTP stack
//!     # let _ = request;
//!     # Ok(Response::new(http::StatusCode::OK))
//! }
//!
//! let api = Fetcher::builder().base("https://foo.bar/").build(fetch);
//! let names: Vec<String> = api.get("json").await?.json()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod fetcher;
mod payload;
mod request;
mod response;
mod transport;

pub mod form;

pub use error::{Error, ErrorKind};
pub use fetcher::{FetchBuilder, Fetcher, FetcherBuilder, TransformRequest};
pub use form::{FormData, FormPart};
pub use payload::Payload;
pub use request::{Body, Request};
pub use response::{Resolved, Response};
pub use transport::Transport;
