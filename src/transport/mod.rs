//! Transport abstraction over the capture-service endpoint.
//!
//! The client only ever issues JSON `POST`s; the trait keeps the surface to
//! exactly that, so test doubles stay trivial.

pub mod async_transport;

pub use async_transport::{AsyncTransport, DynAsyncTransport, ReqwestAsync};

use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub url: Url,
    /// JSON-encoded request body.
    pub body: Vec<u8>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}
