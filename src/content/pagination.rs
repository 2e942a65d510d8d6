//! Cursor pagination over GraphQL connections

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

use super::ContentError;

/// `pageInfo { hasNextPage endCursor }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, info: PageInfo) -> Self {
        Self { items, info }
    }

    /// Cursor of the next page, `None` once the connection is exhausted
    fn next_cursor(&self) -> Option<String> {
        if !self.info.has_next_page {
            return None;
        }
        if self.info.end_cursor.is_none() {
            tracing::warn!("hasNextPage without endCursor, stopping pagination");
        }
        self.info.end_cursor.clone()
    }
}

/// Fetch every page in order, failing on the first error
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, ContentError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ContentError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;

    loop {
        let page = fetch(cursor.take()).await?;
        let next = page.next_cursor();
        items.extend(page.items);
        match next {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }

    Ok(items)
}

/// Retry settings for [`collect_pages_with_retry`]
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Consecutive failures tolerated on a single page
    pub max_attempts: u32,
    /// Delay before retry `n` is `backoff * n`
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

/// Pages gathered before pagination ended
#[derive(Debug)]
pub struct Collected<T> {
    pub items: Vec<T>,
    /// Last error, when the attempts on a page ran out
    pub error: Option<ContentError>,
}

/// Fetch every page, retrying a failing page with linear back-off.
///
/// The attempt counter resets after each successful page. When a page keeps
/// failing, the items gathered so far are returned along with the last error.
pub async fn collect_pages_with_retry<T, F, Fut>(mut fetch: F, policy: RetryPolicy) -> Collected<T>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ContentError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut attempt = 0;

    loop {
        match fetch(cursor.clone()).await {
            Ok(page) => {
                attempt = 0;
                let next = page.next_cursor();
                items.extend(page.items);
                match next {
                    Some(c) => cursor = Some(c),
                    None => return Collected { items, error: None },
                }
            }
            Err(e) => {
                attempt += 1;
                tracing::warn!("Page fetch failed (attempt {}/{}): {}", attempt, policy.max_attempts, e);
                if attempt >= policy.max_attempts {
                    return Collected { items, error: Some(e) };
                }
                tokio::time::sleep(policy.backoff * attempt).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serve `pages` keyed by cursor "0", "1", ...
    fn paged_source(pages: Vec<Vec<u32>>) -> impl FnMut(Option<String>) -> std::future::Ready<Result<Page<u32>, ContentError>> {
        move |cursor| {
            let index: usize = cursor.as_deref().map(|c| c.parse().unwrap()).unwrap_or(0);
            let has_next = index + 1 < pages.len();
            std::future::ready(Ok(Page::new(
                pages[index].clone(),
                PageInfo {
                    has_next_page: has_next,
                    end_cursor: has_next.then(|| (index + 1).to_string()),
                },
            )))
        }
    }

    #[tokio::test]
    async fn test_collect_pages_concatenates_in_order() {
        let items = collect_pages(paged_source(vec![vec![1, 2], vec![3], vec![4, 5]])).await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_collect_pages_stops_without_cursor() {
        let calls = AtomicUsize::new(0);
        let items = collect_pages(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(Page::new(
                vec![1],
                PageInfo { has_next_page: true, end_cursor: None },
            )))
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_collect_pages_propagates_error() {
        let result = collect_pages(|cursor: Option<String>| {
            std::future::ready(match cursor {
                None => Ok(Page::new(
                    vec![1],
                    PageInfo { has_next_page: true, end_cursor: Some("a".into()) },
                )),
                Some(_) => Err(ContentError::Status(500)),
            })
        })
        .await;

        assert!(matches!(result, Err(ContentError::Status(500))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_and_resets_attempts() {
        // Each page fails twice before succeeding; max 3 attempts means every page gets through.
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let collected = collect_pages_with_retry(
            move |cursor: Option<String>| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let index: usize = cursor.as_deref().map(|c| c.parse().unwrap()).unwrap_or(0);
                std::future::ready(if n % 3 < 2 {
                    Err(ContentError::Timeout)
                } else {
                    Ok(Page::new(
                        vec![index as u32],
                        PageInfo {
                            has_next_page: index < 2,
                            end_cursor: (index < 2).then(|| (index + 1).to_string()),
                        },
                    ))
                })
            },
            RetryPolicy::default(),
        )
        .await;

        assert_eq!(collected.items, vec![0, 1, 2]);
        assert!(collected.error.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_with_partial_items() {
        let calls = AtomicUsize::new(0);
        let started = tokio::time::Instant::now();
        let collected = collect_pages_with_retry(
            |cursor: Option<String>| {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(match cursor {
                    None => Ok(Page::new(
                        vec!["a"],
                        PageInfo { has_next_page: true, end_cursor: Some("next".into()) },
                    )),
                    Some(_) => Err(ContentError::Status(503)),
                })
            },
            RetryPolicy::default(),
        )
        .await;

        assert_eq!(collected.items, vec!["a"]);
        assert!(matches!(collected.error, Some(ContentError::Status(503))));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // Back-off of 1s then 2s between the three attempts
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}

/// Property-based tests for pagination
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// The result is the ordered concatenation of all pages and the
        /// source is called exactly once per page.
        #[test]
        fn collect_pages_is_ordered_concatenation(pages in prop::collection::vec(prop::collection::vec(any::<u16>(), 0..5), 1..8)) {
            let calls = AtomicUsize::new(0);
            let source = pages.clone();

            let items = tokio_test::block_on(collect_pages(|cursor: Option<String>| {
                calls.fetch_add(1, Ordering::SeqCst);
                let index: usize = cursor.as_deref().map(|c| c.parse().unwrap()).unwrap_or(0);
                let has_next = index + 1 < source.len();
                std::future::ready(Ok(Page::new(
                    source[index].clone(),
                    PageInfo { has_next_page: has_next, end_cursor: has_next.then(|| (index + 1).to_string()) },
                )))
            })).unwrap();

            let expected: Vec<u16> = pages.iter().flatten().copied().collect();
            prop_assert_eq!(items, expected);
            prop_assert_eq!(calls.load(Ordering::SeqCst), pages.len());
        }
    }
}
