//! The uniform (status, data, error) outcome of a fetch call.
//!
//! Every verb helper returns an [`Outcome`] instead of propagating errors to
//! the caller. Post-processing composes over it with the [`next`] family
//! without unwrapping first, and [`catch`] is the single place an error can
//! escape back into `?` land.
//!
//! [`next`]: Outcome::next
//! [`catch`]: Outcome::catch

use http::StatusCode;

use crate::error::FetchError;

/// The uniform result of one fetch call.
///
/// Carries the HTTP status code when one was obtained, the decoded payload
/// when everything succeeded, and the error that terminated the call
/// otherwise. When `error` is present, `data` is absent; `status` reflects the
/// last known HTTP status, or is absent if the call failed before (or while
/// classifying) a response.
///
/// Values are immutable once built: the chaining operations consume the
/// outcome and return a new one.
#[derive(Debug)]
#[must_use]
pub struct Outcome<T> {
    /// Last known HTTP status code, if a well-formed response was obtained.
    pub status: Option<StatusCode>,
    /// The decoded payload.
    pub data: Option<T>,
    /// The error that terminated the call, if any.
    pub error: Option<FetchError>,
}

impl<T> Outcome<T> {
    /// Runs `preprocess` over the payload, producing the next outcome in the
    /// chain.
    ///
    /// Propagation rules, shared by the whole `next` family:
    ///
    /// * error present: the transform is never run; status and error carry
    ///   over, data is absent.
    /// * no error, payload present: the transform runs; `Ok(Some(u))` becomes
    ///   the new payload, `Ok(None)` an empty success, and `Err(e)` keeps the
    ///   status while replacing the error.
    /// * no error, payload absent: carries over unchanged.
    ///
    /// Transforms with their own error types wrap them via
    /// [`FetchError::process`].
    pub fn next<U>(self, preprocess: impl FnOnce(T) -> Result<Option<U>, FetchError>) -> Outcome<U> {
        let (data, error) = match (self.data, self.error) {
            (_, Some(error)) => (None, Some(error)),
            (None, None) => (None, None),
            (Some(data), None) => match preprocess(data) {
                Ok(data) => (data, None),
                Err(error) => (None, Some(error)),
            },
        };
        Outcome {
            status: self.status,
            data,
            error,
        }
    }

    /// Like [`next`](Self::next), but the transform also sees the status code
    /// of the outcome it is refining.
    pub fn next_with_status<U>(
        self,
        preprocess: impl FnOnce(T, Option<StatusCode>) -> Result<Option<U>, FetchError>,
    ) -> Outcome<U> {
        let status = self.status;
        self.next(|data| preprocess(data, status))
    }

    /// Like [`next`](Self::next), but the transform sees the whole prior
    /// outcome rather than just the payload.
    ///
    /// The transform still only runs when the payload is present and no error
    /// is set, so `outcome.data` is guaranteed `Some` inside the closure.
    pub fn next_outcome<U>(
        self,
        preprocess: impl FnOnce(&Outcome<T>) -> Result<Option<U>, FetchError>,
    ) -> Outcome<U> {
        if self.error.is_some() {
            return Outcome {
                status: self.status,
                data: None,
                error: self.error,
            };
        }
        if self.data.is_none() {
            return Outcome {
                status: self.status,
                data: None,
                error: None,
            };
        }
        match preprocess(&self) {
            Ok(data) => Outcome {
                status: self.status,
                data,
                error: None,
            },
            Err(error) => Outcome {
                status: self.status,
                data: None,
                error: Some(error),
            },
        }
    }

    /// Hands the error, if any, to `handler`, returning the outcome unchanged
    /// when the handler succeeds.
    ///
    /// # Errors
    ///
    /// This is the one chaining operation that can surface a failure to the
    /// caller: if `handler` itself fails, that failure is returned from
    /// `catch` instead of being folded back into the outcome.
    pub fn catch<E>(self, handler: impl FnOnce(&FetchError) -> Result<(), E>) -> Result<Self, E> {
        if let Some(error) = &self.error {
            handler(error)?;
        }
        Ok(self)
    }

    /// Like [`catch`](Self::catch), but the handler also sees the status code.
    ///
    /// # Errors
    ///
    /// Returns the handler's failure, like [`catch`](Self::catch).
    pub fn catch_with_status<E>(
        self,
        handler: impl FnOnce(Option<StatusCode>, &FetchError) -> Result<(), E>,
    ) -> Result<Self, E> {
        if let Some(error) = &self.error {
            handler(self.status, error)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(data: i32) -> Outcome<i32> {
        Outcome {
            status: Some(StatusCode::OK),
            data: Some(data),
            error: None,
        }
    }

    fn failed(status: Option<StatusCode>, error: FetchError) -> Outcome<i32> {
        Outcome {
            status,
            data: None,
            error: Some(error),
        }
    }

    #[test]
    fn next_applies_the_transform_to_the_payload() {
        let outcome = success(20).next(|n| Ok(Some(n + 1)));
        assert_eq!(outcome.status, Some(StatusCode::OK));
        assert_eq!(outcome.data, Some(21));
        assert!(outcome.error.is_none());
    }

    #[test]
    fn next_identity_preserves_the_payload() {
        let outcome = success(7).next(|n| Ok(Some(n)));
        assert_eq!(outcome.data, Some(7));
    }

    #[test]
    fn next_never_runs_on_an_errored_outcome() {
        let outcome = failed(Some(StatusCode::NOT_FOUND), FetchError::InvalidResponse {
            status: StatusCode::NOT_FOUND,
        });
        let outcome: Outcome<String> = outcome.next(|_| unreachable!("transform must not run"));
        assert_eq!(outcome.status, Some(StatusCode::NOT_FOUND));
        assert!(outcome.data.is_none());
        assert!(matches!(
            outcome.error,
            Some(FetchError::InvalidResponse { status }) if status == StatusCode::NOT_FOUND
        ));
    }

    #[test]
    fn failed_transform_replaces_the_error_but_keeps_the_status() {
        let outcome: Outcome<i32> = success(1).next(|_| Err(FetchError::InvalidData));
        assert_eq!(outcome.status, Some(StatusCode::OK));
        assert!(outcome.data.is_none());
        assert!(matches!(outcome.error, Some(FetchError::InvalidData)));
    }

    #[test]
    fn transform_may_drop_the_payload() {
        let outcome: Outcome<i32> = success(1).next(|_| Ok(None));
        assert!(outcome.data.is_none());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn empty_success_carries_over_without_running_the_transform() {
        let outcome = Outcome::<i32> {
            status: Some(StatusCode::OK),
            data: None,
            error: None,
        };
        let outcome: Outcome<i32> = outcome.next(|_| unreachable!("transform must not run"));
        assert_eq!(outcome.status, Some(StatusCode::OK));
        assert!(outcome.data.is_none());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn next_with_status_hands_the_status_to_the_transform() {
        let outcome = success(5).next_with_status(|n, status| {
            assert_eq!(status, Some(StatusCode::OK));
            Ok(Some(n * 2))
        });
        assert_eq!(outcome.data, Some(10));
    }

    #[test]
    fn next_outcome_sees_the_whole_prior_value() {
        let outcome = success(5).next_outcome(|prior| {
            assert_eq!(prior.status, Some(StatusCode::OK));
            Ok(prior.data.map(|n| n.to_string()))
        });
        assert_eq!(outcome.data.as_deref(), Some("5"));
    }

    #[test]
    fn next_outcome_propagates_errors_untouched() {
        let outcome = failed(None, FetchError::InvalidData);
        let outcome: Outcome<String> = outcome.next_outcome(|_| unreachable!("transform must not run"));
        assert!(outcome.status.is_none());
        assert!(matches!(outcome.error, Some(FetchError::InvalidData)));
    }

    #[test]
    fn catch_skips_the_handler_on_success() {
        let outcome = success(1)
            .catch(|_| -> Result<(), FetchError> { unreachable!("handler must not run") })
            .unwrap();
        assert_eq!(outcome.data, Some(1));
    }

    #[test]
    fn catch_hands_the_error_to_the_handler() {
        let seen = std::cell::Cell::new(false);
        let outcome = failed(None, FetchError::InvalidData)
            .catch(|error| -> Result<(), FetchError> {
                assert!(matches!(error, FetchError::InvalidData));
                seen.set(true);
                Ok(())
            })
            .unwrap();
        assert!(seen.get());
        assert!(matches!(outcome.error, Some(FetchError::InvalidData)));
    }

    #[test]
    fn catch_surfaces_a_raising_handler() {
        let result = failed(None, FetchError::InvalidData).catch(|_| Err(FetchError::Cancelled));
        assert!(matches!(result, Err(FetchError::Cancelled)));
    }

    #[test]
    fn catch_with_status_sees_the_status_code() {
        let result = failed(
            Some(StatusCode::NOT_FOUND),
            FetchError::InvalidResponse {
                status: StatusCode::NOT_FOUND,
            },
        )
        .catch_with_status(|status, _| -> Result<(), FetchError> {
            assert_eq!(status, Some(StatusCode::NOT_FOUND));
            Ok(())
        });
        assert!(result.is_ok());
    }
}
