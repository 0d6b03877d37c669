//! The retry loop.
//!
//! Attempts run strictly one after another. Failures before the last
//! attempt are logged and dropped; the last one is returned as-is.

use std::fmt::Display;
use std::future::Future;

use super::policy::{RetryConfig, RetryDecision, RetryState};

/// Executes an operation with retry logic.
///
/// There is no per-attempt timeout: an attempt that never resolves stalls
/// the sequence. Synchronous operations can be passed as
/// `|| async { op() }`.
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    key: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut state = RetryState::new();

    loop {
        match operation().await {
            Ok(result) => {
                state.record_success();
                if state.attempt > 0 {
                    tracing::debug!(
                        key,
                        attempts = state.attempts_made(),
                        "Operation succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(e) => match state.record_failure(config) {
                RetryDecision::Retry(delay) => {
                    tracing::debug!(
                        key,
                        attempt = state.attempts_made(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Retrying after error"
                    );
                    tokio::time::sleep(delay).await;
                    state.begin_next_attempt();
                }
                RetryDecision::GiveUp => {
                    tracing::warn!(
                        key,
                        attempts = state.attempts_made(),
                        error = %e,
                        "Retries exhausted"
                    );
                    return Err(e);
                }
            },
        }
    }
}

/// Config behind [`fetch_with_retry`]: linear 100ms steps, never capped.
fn fetch_config(retries: usize) -> RetryConfig {
    RetryConfig::new()
        .with_max_attempts(retries)
        .with_max_delay_ms(u64::MAX)
}

/// Runs `operation` up to `retries` times with 100/200/300ms linear backoff.
///
/// The wait after failure `i` is always `100 * (i + 1)` ms, however many
/// attempts are requested. Pass [`DEFAULT_RETRIES`](super::DEFAULT_RETRIES)
/// for the usual three attempts.
pub async fn fetch_with_retry<T, E, F, Fut>(operation: F, retries: usize) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    with_retry(&fetch_config(retries), "fetch_with_retry", operation).await
}
