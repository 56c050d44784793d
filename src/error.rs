//! Error types and the [`Error`] trait.
//!
//! All errors in this library implement the [`Error`] trait, which extends
//! [`std::error::Error`] with retry semantics. [`BoxedError`] provides
//! type-erased error handling while preserving retryability; it is how
//! opaque transport and post-processing failures travel inside a
//! [`FetchError`].

use std::convert::Infallible;

use http::StatusCode;
use snafu::{AsErrorSource, Snafu};

/// Errors that may occur in the library.
pub trait Error: std::error::Error + AsErrorSource + Send + Sync + 'static {
    /// If true, this indicates that a failed request may succeed if retried.
    fn is_retryable(&self) -> bool;
}

impl Error for Infallible {
    fn is_retryable(&self) -> bool {
        false
    }
}

/// A boxed error that can be used without type parameters.
#[derive(Debug, Snafu)]
#[snafu(transparent)]
pub struct BoxedError {
    source: Box<dyn Error>,
}

impl BoxedError {
    /// Create a new boxed error from a generic `Error`.
    pub fn from_err<E: Error + 'static>(err: E) -> Self {
        Self {
            source: Box::new(err),
        }
    }
}

impl Error for BoxedError {
    fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}

/// The ways a single fetch call can end without a decoded payload.
///
/// Exactly one of these lands in [`Outcome::error`](crate::Outcome::error)
/// when a call fails. Only [`FetchError::InvalidResponse`] keeps the HTTP
/// status code alongside it; every other kind reports the outcome with no
/// status at all.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum FetchError {
    /// The endpoint string did not parse as an absolute URL.
    #[snafu(display("invalid url: {message}"))]
    InvalidUrl {
        /// Why the endpoint was rejected.
        message: String,
    },

    /// The transport produced a reply without HTTP status semantics.
    #[snafu(display("reply is not an http response"))]
    InvalidHttpResponse,

    /// The response body was missing, or did not decode as the requested type.
    #[snafu(display("response body is missing or not decodable as the requested type"))]
    InvalidData,

    /// The response carried a status code other than 200.
    #[snafu(display("unexpected http status {status}"))]
    InvalidResponse {
        /// The status code the server actually returned.
        status: StatusCode,
    },

    /// The transport failed before a reply was obtained.
    #[snafu(display("transport failure: {source}"))]
    Transport {
        /// The underlying transport error, type-erased.
        source: BoxedError,
    },

    /// The call's [`CancelHandle`](crate::CancelHandle) fired first.
    #[snafu(display("request was cancelled"))]
    Cancelled,

    /// A [`next`](crate::Outcome::next) transform failed with a caller error.
    #[snafu(display("post-processing failed: {source}"))]
    Process {
        /// The caller's error, type-erased.
        source: BoxedError,
    },
}

impl FetchError {
    /// Wraps an arbitrary error from a post-processing step.
    pub fn process<E: Error + 'static>(source: E) -> Self {
        Self::Process {
            source: BoxedError::from_err(source),
        }
    }
}

impl Error for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { source } | Self::Process { source } => source.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Snafu)]
    #[snafu(display("flaky"))]
    struct FlakyError;

    impl Error for FlakyError {
        fn is_retryable(&self) -> bool {
            true
        }
    }

    #[test]
    fn transport_errors_keep_their_retryability() {
        let error = FetchError::Transport {
            source: BoxedError::from_err(FlakyError),
        };
        assert!(error.is_retryable());
        assert!(!FetchError::InvalidData.is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());
    }

    #[test]
    fn process_wraps_the_caller_error_message() {
        let error = FetchError::process(FlakyError);
        assert_eq!(error.to_string(), "post-processing failed: flaky");
    }
}
