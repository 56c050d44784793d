//! GET/POST/PUT/DELETE/PATCH helpers that run a single request through a
//! pluggable async transport, decode the JSON body into a typed value, and
//! report status, data and error as one uniform [`Outcome`].

#![forbid(unsafe_code)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]

mod cancel;
mod decode;
mod error;
#[cfg(feature = "transport-reqwest")]
pub mod factory;
mod fetcher;
mod outcome;
pub mod transport;

pub use cancel::CancelHandle;
pub use error::{BoxedError, Error, FetchError};
pub use fetcher::Fetcher;
pub use outcome::Outcome;

/// Documentation
pub mod _documentation {
    #[doc = include_str!("../README.md")]
    mod readme {}
    #[doc = include_str!("../CHANGELOG.md")]
    pub mod changelog {}
}

pub use bytes::Bytes;
