use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};

use super::{Transport, TransportReply};

impl Transport for reqwest::Client {
    type Error = reqwest::Error;
    type Reply = reqwest::Response;

    /// Executes an `http::Request` using the `reqwest::Client`.
    ///
    /// Converts the generic `http::Request<Bytes>` into a `reqwest::Request`
    /// and then sends it.
    async fn execute(&self, request: Request<Bytes>) -> Result<Self::Reply, Self::Error> {
        let (parts, body) = request.into_parts();
        let reqwest_request = self
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .build()?;

        reqwest::Client::execute(self, reqwest_request).await
    }
}

impl TransportReply for reqwest::Response {
    type Error = reqwest::Error;

    /// A `reqwest::Response` always carries HTTP status semantics.
    fn status(&self) -> Option<StatusCode> {
        Some(self.status())
    }

    fn headers(&self) -> HeaderMap {
        self.headers().clone()
    }

    /// Reads the full body; `reqwest` yields empty bytes rather than no body.
    async fn body(self) -> Result<Option<Bytes>, Self::Error> {
        self.bytes().await.map(Some)
    }
}

impl crate::Error for reqwest::Error {
    fn is_retryable(&self) -> bool {
        self.is_connect()
    }
}
