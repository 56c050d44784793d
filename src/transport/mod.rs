//! Transport traits decoupling the library from any specific HTTP client.
//!
//! This module defines the capability that actually performs network I/O.
//! Users provide their own [`Transport`] (e.g. backed by `reqwest`, `hyper`,
//! or a test double) and the fetcher operates against these traits. A ready
//! implementation for `reqwest::Client` ships behind the `transport-reqwest`
//! feature.

#[cfg(feature = "transport-reqwest")]
mod reqwest_0_12;

use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};

/// Executes one HTTP request.
pub trait Transport: Send + Sync {
    /// The error type for a request that failed before any reply was obtained.
    type Error: crate::Error;

    /// The reply type produced by this transport.
    type Reply: TransportReply;

    /// Executes an HTTP request and returns an owned reply.
    ///
    /// The request body is provided as [`bytes::Bytes`]; an empty body means
    /// "no body". Exactly one network operation is expected per call.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Self::Reply, Self::Error>> + Send;
}

/// A reply from the transport, which may or may not be a well-formed HTTP
/// response.
pub trait TransportReply: Send + Sync {
    /// The error type when reading the reply body.
    type Error: crate::Error;

    /// Returns the HTTP status code, or `None` when the reply lacks HTTP
    /// status semantics altogether.
    fn status(&self) -> Option<StatusCode>;

    /// Returns the reply's HTTP headers.
    fn headers(&self) -> HeaderMap;

    /// Consumes the reply and asynchronously yields its raw payload.
    ///
    /// `None` means the reply carried no body at all; an empty `Bytes` is a
    /// present-but-empty body and will still be handed to the decoder.
    fn body(self) -> impl Future<Output = Result<Option<Bytes>, Self::Error>> + Send;
}
