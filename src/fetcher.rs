//! Verb helpers and outcome classification over a [`Transport`].

use bon::bon;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::prelude::*;

use crate::cancel::CancelHandle;
use crate::decode;
use crate::error::{
    BoxedError, CancelledSnafu, FetchError, InvalidDataSnafu, InvalidHttpResponseSnafu,
    InvalidResponseSnafu, InvalidUrlSnafu, TransportSnafu,
};
use crate::outcome::Outcome;
use crate::transport::{Transport, TransportReply};

/// Issues HTTP calls and classifies their outcomes.
///
/// One verb helper per supported method: [`get`](Fetcher::get),
/// [`post`](Fetcher::post), [`put`](Fetcher::put), [`delete`](Fetcher::delete)
/// and [`patch`](Fetcher::patch). Each builds a request, runs exactly one
/// network operation through the transport, decodes the JSON body into the
/// caller's type, and returns an [`Outcome`] — the helpers are total and never
/// propagate an error to the caller.
///
/// The fetcher is stateless apart from the transport it wraps; construct one
/// per transport with [`Fetcher::new`], or use the shared default in
/// [`factory`](crate::factory).
#[derive(Debug, Clone)]
pub struct Fetcher<C> {
    transport: C,
}

impl<C: Transport> Fetcher<C> {
    /// Creates a fetcher that issues every call through `transport`.
    pub fn new(transport: C) -> Self {
        Self { transport }
    }

    /// Returns the transport this fetcher issues calls through.
    pub fn transport(&self) -> &C {
        &self.transport
    }
}

#[bon]
impl<C: Transport> Fetcher<C> {
    /// Fetches `endpoint` with a GET request and decodes the JSON body as `T`.
    ///
    /// Optional builder members: `headers` for additional request headers,
    /// `cancel` for a per-call [`CancelHandle`].
    #[builder]
    pub async fn get<T: DeserializeOwned>(
        &self,
        #[builder(start_fn, into)] endpoint: String,
        headers: Option<HeaderMap>,
        cancel: Option<CancelHandle>,
    ) -> Outcome<T> {
        self.dispatch(Method::GET, &endpoint, None, headers, cancel)
            .await
    }

    /// Fetches `endpoint` with a POST request and decodes the JSON body as `T`.
    ///
    /// The optional `body` is serialized as JSON. Optional builder members:
    /// `headers`, `cancel`.
    #[builder]
    pub async fn post<T: DeserializeOwned>(
        &self,
        #[builder(start_fn, into)] endpoint: String,
        body: Option<Value>,
        headers: Option<HeaderMap>,
        cancel: Option<CancelHandle>,
    ) -> Outcome<T> {
        self.dispatch(Method::POST, &endpoint, body.as_ref(), headers, cancel)
            .await
    }

    /// Fetches `endpoint` with a PUT request and decodes the JSON body as `T`.
    #[builder]
    pub async fn put<T: DeserializeOwned>(
        &self,
        #[builder(start_fn, into)] endpoint: String,
        body: Option<Value>,
        headers: Option<HeaderMap>,
        cancel: Option<CancelHandle>,
    ) -> Outcome<T> {
        self.dispatch(Method::PUT, &endpoint, body.as_ref(), headers, cancel)
            .await
    }

    /// Fetches `endpoint` with a DELETE request and decodes the JSON body as `T`.
    #[builder]
    pub async fn delete<T: DeserializeOwned>(
        &self,
        #[builder(start_fn, into)] endpoint: String,
        headers: Option<HeaderMap>,
        cancel: Option<CancelHandle>,
    ) -> Outcome<T> {
        self.dispatch(Method::DELETE, &endpoint, None, headers, cancel)
            .await
    }

    /// Fetches `endpoint` with a PATCH request and decodes the JSON body as `T`.
    #[builder]
    pub async fn patch<T: DeserializeOwned>(
        &self,
        #[builder(start_fn, into)] endpoint: String,
        body: Option<Value>,
        headers: Option<HeaderMap>,
        cancel: Option<CancelHandle>,
    ) -> Outcome<T> {
        self.dispatch(Method::PATCH, &endpoint, body.as_ref(), headers, cancel)
            .await
    }
}

impl<C: Transport> Fetcher<C> {
    /// Runs one call and folds any failure into the returned [`Outcome`].
    ///
    /// Only [`FetchError::InvalidResponse`] keeps its status code in the
    /// outcome; every other failure reports no status, including decode
    /// failures that happened after a perfectly good status line.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        headers: Option<HeaderMap>,
        cancel: Option<CancelHandle>,
    ) -> Outcome<T> {
        match self.run(method, endpoint, body, headers, cancel).await {
            Ok(outcome) => outcome,
            Err(error) => {
                let status = match &error {
                    FetchError::InvalidResponse { status } => Some(*status),
                    _ => None,
                };
                Outcome {
                    status,
                    data: None,
                    error: Some(error),
                }
            }
        }
    }

    async fn run<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        headers: Option<HeaderMap>,
        cancel: Option<CancelHandle>,
    ) -> Result<Outcome<T>, FetchError> {
        let uri = parse_endpoint(endpoint)?;
        let request = build_request(uri, method, body, headers);

        let execute = self.transport.execute(request);
        let reply = match cancel {
            Some(cancel) => {
                tokio::select! {
                    reply = execute => reply,
                    () = cancel.cancelled() => return CancelledSnafu.fail(),
                }
            }
            None => execute.await,
        }
        .map_err(BoxedError::from_err)
        .context(TransportSnafu)?;

        let status = reply.status().context(InvalidHttpResponseSnafu)?;
        let payload = reply
            .body()
            .await
            .map_err(BoxedError::from_err)
            .context(TransportSnafu)?;

        ensure!(payload.is_some(), InvalidDataSnafu);
        ensure!(status == StatusCode::OK, InvalidResponseSnafu { status });

        let data = decode::json_body(payload.as_ref())?;
        Ok(Outcome {
            status: Some(status),
            data,
            error: None,
        })
    }
}

/// Parses the endpoint into an absolute URI.
fn parse_endpoint(endpoint: &str) -> Result<Uri, FetchError> {
    let uri = endpoint.parse::<Uri>().map_err(|error| {
        InvalidUrlSnafu {
            message: error.to_string(),
        }
        .build()
    })?;
    ensure!(
        uri.scheme().is_some() && uri.authority().is_some(),
        InvalidUrlSnafu {
            message: format!("endpoint `{endpoint}` is not an absolute url"),
        }
    );
    Ok(uri)
}

fn build_request(
    uri: Uri,
    method: Method,
    body: Option<&Value>,
    headers: Option<HeaderMap>,
) -> Request<Bytes> {
    let (mut parts, ()) = Request::new(()).into_parts();
    parts.method = method;
    parts.uri = uri;
    if let Some(headers) = headers {
        parts.headers = headers;
    }

    // A body that fails to serialize degrades to no body at all.
    let body = body
        .and_then(|body| serde_json::to_vec(body).ok())
        .map_or_else(Bytes::new, Bytes::from);

    Request::from_parts(parts, body)
}
