//! The resilient request engine and its building blocks.
//!
//! [`HttpClient`] is the single chokepoint through which every resource
//! method issues HTTP calls. It layers retry with backoff, idempotency-safe
//! mutation, timeout and cancellation, and error classification over an
//! injected [`HttpTransport`].

mod backoff;
mod http;
mod paginate;
mod request;
mod response;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use backoff::{delay as backoff_delay, BASE_DELAY_MS};
pub use http::{HttpClient, CLIENT_VERSION};
pub use paginate::Paginator;
pub use request::{HttpMethod, QueryPairs, RequestOptions};
pub use response::{Envelope, Page, PageMeta, HEADER_REQUEST_ID};
pub use transport::{
    HttpTransport, RawRequest, RawResponse, ReqwestTransport, Sleeper, TokioSleeper,
    TransportError,
};
