//! Concurrent fetching of follow-up pages.
//!
//! After the first page of a listing reports `total_pages`, the remaining
//! pages are independent requests and can be fetched side by side.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Type alias for boxed futures used in parallel fetching
type PageFuture<'a, P> = Pin<Box<dyn Future<Output = (u32, Result<P>)> + Send + 'a>>;

/// Fetch `pages` with at most `max_concurrent` requests in flight.
///
/// Results come back sorted by page number regardless of arrival order.
/// The first failure aborts the whole batch.
pub async fn fetch_pages<'a, P, F, Fut>(
    pages: Vec<u32>,
    fetch_page: F,
    max_concurrent: usize,
) -> Result<Vec<P>>
where
    P: Send + 'a,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<P>> + Send + 'a,
{
    if pages.is_empty() {
        return Ok(Vec::new());
    }

    let max_concurrent = max_concurrent.max(1);
    debug!(
        "Fetching {} pages with max {} concurrent",
        pages.len(),
        max_concurrent
    );

    let mut fetched: Vec<(u32, P)> = Vec::with_capacity(pages.len());
    let mut futures: FuturesUnordered<PageFuture<'a, P>> = FuturesUnordered::new();
    let mut pending_pages = pages.into_iter();

    let make_future = |page: u32| -> PageFuture<'a, P> {
        let fut = fetch_page(page);
        Box::pin(async move { (page, fut.await) })
    };

    for page in pending_pages.by_ref().take(max_concurrent) {
        futures.push(make_future(page));
    }

    while let Some((page, result)) = futures.next().await {
        fetched.push((page, result?));
        debug!("Page {} done", page);

        if let Some(next_page) = pending_pages.next() {
            futures.push(make_future(next_page));
        }
    }

    fetched.sort_by_key(|(page, _)| *page);
    Ok(fetched.into_iter().map(|(_, p)| p).collect())
}
