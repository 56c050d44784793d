//! Convenience access to a fetcher over the default transport.
//!
//! [`shared`] hands out one process-wide [`Fetcher`] backed by a default
//! `reqwest::Client`. It exists purely for convenience: there is no hidden
//! mutable state and no swap point. Code that needs a different transport, a
//! configured client, or isolation between tests constructs its own fetcher
//! with [`Fetcher::new`].

use std::sync::LazyLock;

use crate::fetcher::Fetcher;

static SHARED: LazyLock<Fetcher<reqwest::Client>> =
    LazyLock::new(|| Fetcher::new(reqwest::Client::new()));

/// Returns the process-wide fetcher backed by the default `reqwest` transport.
#[must_use]
pub fn shared() -> &'static Fetcher<reqwest::Client> {
    &SHARED
}
