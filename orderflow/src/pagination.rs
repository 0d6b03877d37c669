//! Sequential page iteration over a paged source.

use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Whether another page follows.
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Creates a page.
    #[must_use]
    pub fn new(items: Vec<T>, has_next: bool) -> Self {
        Self { items, has_next }
    }
}

/// Streams pages starting at `start_page`.
///
/// Pages are fetched one at a time, only as the stream is polled. The
/// stream ends after a page with `has_next == false`, or right after
/// yielding a fetch error.
pub fn paginate<T, E, F, Fut>(
    fetch_page: F,
    start_page: u32,
) -> impl Stream<Item = Result<Page<T>, E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    stream::unfold(
        (Some(start_page), fetch_page),
        |(next, mut fetch_page)| async move {
            let page = next?;
            let result = fetch_page(page).await;

            let following = match &result {
                Ok(fetched) if fetched.has_next => page.checked_add(1),
                _ => None,
            };
            tracing::trace!(page, more = following.is_some(), "Fetched page");

            Some((result, (following, fetch_page)))
        },
    )
}
