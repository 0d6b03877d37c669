//! Retry-with-backoff execution for fallible async operations.
//!
//! [`fetch_with_retry`] is the common entry point: three attempts with
//! 100ms, 200ms linear waits in between. [`with_retry`] takes a full
//! [`RetryConfig`] for other schedules.

mod executor;
mod policy;
mod safe;

pub use executor::{fetch_with_retry, with_retry};
pub use policy::{
    BackoffStrategy, JitterStrategy, RetryConfig, RetryDecision, RetryPhase, RetryState,
    DEFAULT_RETRIES,
};
pub use safe::safe_execute;
