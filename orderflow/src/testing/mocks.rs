//! Scripted operations for exercising the retry executor.

use futures::future::{ready, Ready};
use parking_lot::Mutex;
use thiserror::Error;

/// Failure produced by [`FlakyOperation`], tagged with the attempt number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Network error on attempt {attempt}")]
pub struct FlakyError {
    /// 1-based attempt that produced this failure.
    pub attempt: usize,
}

/// An operation that fails a fixed number of times, then succeeds.
#[derive(Debug)]
pub struct FlakyOperation<T> {
    failures_before_success: usize,
    value: T,
    call_count: Mutex<usize>,
}

impl<T: Clone> FlakyOperation<T> {
    /// Creates an operation that fails `failures` times before returning `value`.
    #[must_use]
    pub fn new(failures: usize, value: T) -> Self {
        Self {
            failures_before_success: failures,
            value,
            call_count: Mutex::new(0),
        }
    }

    /// Creates an operation that never succeeds.
    #[must_use]
    pub fn always_failing(value: T) -> Self {
        Self::new(usize::MAX, value)
    }

    /// Invokes the operation once.
    pub fn call(&self) -> Ready<Result<T, FlakyError>> {
        let attempt = {
            let mut count = self.call_count.lock();
            *count += 1;
            *count
        };

        if attempt <= self.failures_before_success {
            ready(Err(FlakyError { attempt }))
        } else {
            ready(Ok(self.value.clone()))
        }
    }

    /// Returns the number of times the operation was invoked.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.call_count.lock()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        *self.call_count.lock() = 0;
    }
}
