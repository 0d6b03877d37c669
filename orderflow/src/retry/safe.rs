//! Fallback wrapper that trades a failure for a default value.

use std::fmt::Display;
use std::future::Future;

/// Awaits `operation`, returning `default` (and logging) if it fails.
pub async fn safe_execute<T, E, F, Fut>(operation: F, default: T) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    match operation().await {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "Operation failed");
            default
        }
    }
}
