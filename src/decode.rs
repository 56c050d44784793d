//! JSON body decoding.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{FetchError, InvalidDataSnafu};

/// Decodes a raw payload into `T`.
///
/// An absent payload is "no value", not an error. Any decode failure, whether
/// malformed JSON or a schema mismatch, collapses into
/// [`FetchError::InvalidData`]; the serde detail is not surfaced.
pub(crate) fn json_body<T: DeserializeOwned>(payload: Option<&Bytes>) -> Result<Option<T>, FetchError> {
    let Some(payload) = payload else {
        return Ok(None);
    };
    serde_json::from_slice(payload)
        .map(Some)
        .map_err(|_| InvalidDataSnafu.build())
}
