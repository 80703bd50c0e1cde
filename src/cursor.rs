//! Cursor-based pagination.
//!
//! Paginated endpoints differ in how they cursor (numeric cursors on id
//! endpoints, max-id cursors on favorites and timelines), but every one of
//! them fits the same contract: give me a token, get back a page and the
//! next token. [`CursorIterator`] owns that contract;
//! [`MultiLevelCursorIterator`] layers batched id resolution on top of it
//! for the friends/followers family.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;

/// Maximum ids per `users/lookup` call, enforced by the upstream API.
pub const USER_LOOKUP_BATCH_SIZE: usize = 100;

/// Opaque pagination token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// The "beginning" sentinel; the first page.
    Start,

    /// Token designating the next page, as returned by the upstream source.
    Next(String),

    /// The "no-more-pages" sentinel.
    End,
}

impl Cursor {
    /// Whether this token is the "no-more-pages" sentinel.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

/// One page of results plus the token for the page after it.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items in this page, in upstream order.
    pub items: Vec<T>,

    /// Token for the next page; [`Cursor::End`] when exhausted.
    pub next: Cursor,
}

impl<T> Page<T> {
    /// An empty, terminal page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            next: Cursor::End,
        }
    }

    /// Whether the page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fetches one page for a given cursor token. Implementations hide the
/// per-endpoint pagination quirks behind the uniform [`Cursor`] mapping.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Item type yielded by the endpoint.
    type Item: Send;

    /// Fetch the page designated by `cursor`.
    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<Self::Item>>;
}

/// Resolves a batch of ids into full objects. `max_batch_size` ids per call
/// at most; callers split larger id lists.
#[async_trait]
pub trait BatchResolver: Send + Sync {
    /// Id type consumed.
    type Id: Send + Sync + Clone;

    /// Resolved object type produced.
    type Output: Send;

    /// Upper bound on ids per resolve call.
    fn max_batch_size(&self) -> usize {
        USER_LOOKUP_BATCH_SIZE
    }

    /// Resolve `ids` into full objects, preserving input order.
    async fn resolve(&self, ids: &[Self::Id]) -> Result<Vec<Self::Output>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IterState {
    NotStarted,
    HasMore,
    Completed,
}

struct IterPosition {
    state: IterState,
    cursor: Cursor,
}

/// Single-level cursor iterator.
///
/// Advancement is serialized by an internal single-operation lock, so a
/// shared iterator never holds more than one in-flight cursor. A fetch
/// failure leaves the position untouched; the caller's retry resumes from
/// the same token. Once completed, further calls return an empty page
/// without invoking the fetcher again.
pub struct CursorIterator<F: PageFetcher> {
    fetcher: F,
    position: Mutex<IterPosition>,
}

impl<F: PageFetcher> CursorIterator<F> {
    /// Iterator starting at the beginning.
    pub fn new(fetcher: F) -> Self {
        Self::with_cursor(fetcher, Cursor::Start)
    }

    /// Iterator starting at a caller-supplied token.
    pub fn with_cursor(fetcher: F, starting: Cursor) -> Self {
        let state = if starting.is_end() {
            IterState::Completed
        } else {
            IterState::NotStarted
        };
        Self {
            fetcher,
            position: Mutex::new(IterPosition {
                state,
                cursor: starting,
            }),
        }
    }

    /// Fetch the next page.
    ///
    /// Returns an empty page once the iterator has completed; this is a
    /// no-op, not an error, so callers may re-poll defensively.
    pub async fn next_page(&self) -> Result<Page<F::Item>> {
        let mut position = self.position.lock().await;
        if position.state == IterState::Completed {
            return Ok(Page::empty());
        }

        // On failure the position is left untouched: the token still names
        // the last successfully consumed page.
        let page = self.fetcher.fetch_page(&position.cursor).await?;

        position.state = if page.next.is_end() || page.is_empty() {
            IterState::Completed
        } else {
            IterState::HasMore
        };
        position.cursor = page.next.clone();

        Ok(page)
    }

    /// Whether iteration has reached the "no-more-pages" sentinel.
    pub async fn completed(&self) -> bool {
        self.position.lock().await.state == IterState::Completed
    }

    /// The current cursor token.
    pub async fn current_cursor(&self) -> Cursor {
        self.position.lock().await.cursor.clone()
    }
}

/// Two-level cursor iterator for endpoints that paginate ids and then
/// resolve each id page into full objects through capped batch calls.
///
/// One `next_page` call yields one fully resolved outer page: it advances
/// the outer cursor when the inner batch queue is exhausted, splits the
/// outer id page into batches no larger than the resolver's cap, issues one
/// resolve call per batch, and concatenates the results preserving the
/// outer id order.
pub struct MultiLevelCursorIterator<F, R>
where
    F: PageFetcher,
    F::Item: Sync + Clone,
    R: BatchResolver<Id = F::Item>,
{
    outer: CursorIterator<F>,
    resolver: R,
    pending: Mutex<VecDeque<Vec<F::Item>>>,
}

impl<F, R> MultiLevelCursorIterator<F, R>
where
    F: PageFetcher,
    F::Item: Sync + Clone,
    R: BatchResolver<Id = F::Item>,
{
    /// Iterator over `outer` id pages resolved through `resolver`.
    pub fn new(outer: CursorIterator<F>, resolver: R) -> Self {
        Self {
            outer,
            resolver,
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Fetch and resolve the next outer page.
    ///
    /// A resolve failure keeps the batch queue intact, so a retry resumes
    /// resolving the same outer page without re-fetching the outer cursor.
    pub async fn next_page(&self) -> Result<Page<R::Output>> {
        let mut pending = self.pending.lock().await;

        if pending.is_empty() {
            let outer_page = self.outer.next_page().await?;
            let cap = self.resolver.max_batch_size().max(1);
            for batch in outer_page.items.chunks(cap) {
                pending.push_back(batch.to_vec());
            }
        }

        let mut items = Vec::new();
        for batch in pending.iter() {
            // Queue is only drained after every batch resolved.
            items.extend(self.resolver.resolve(batch).await?);
        }
        pending.clear();

        let next = if self.outer.completed().await {
            Cursor::End
        } else {
            self.outer.current_cursor().await
        };
        Ok(Page { items, next })
    }

    /// Whether both the outer cursor and the inner batch queue are exhausted.
    pub async fn completed(&self) -> bool {
        self.outer.completed().await && self.pending.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::Error;

    /// Fetcher yielding a fixed script of pages, counting fetch calls.
    struct ScriptedFetcher {
        pages: Vec<Page<u64>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Page<u64>>) -> Self {
            Self {
                pages,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        type Item = u64;

        async fn fetch_page(&self, _cursor: &Cursor) -> Result<Page<u64>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.pages[n.min(self.pages.len() - 1)].clone())
        }
    }

    fn page(items: Vec<u64>, next: Cursor) -> Page<u64> {
        Page { items, next }
    }

    #[tokio::test]
    async fn three_page_script_yields_two_non_empty_pages() {
        let fetcher = ScriptedFetcher::new(vec![
            page(vec![1, 2], Cursor::Next("a".into())),
            page(vec![3], Cursor::Next("b".into())),
            page(vec![], Cursor::End),
        ]);
        let iterator = CursorIterator::new(fetcher);

        let mut non_empty = 0;
        loop {
            let page = iterator.next_page().await.unwrap();
            if page.is_empty() {
                break;
            }
            non_empty += 1;
        }
        assert_eq!(non_empty, 2);
        assert!(iterator.completed().await);
    }

    #[tokio::test]
    async fn completion_is_idempotent_and_never_refetches() {
        let fetcher = ScriptedFetcher::new(vec![page(vec![1], Cursor::End)]);
        let iterator = CursorIterator::new(fetcher);

        let first = iterator.next_page().await.unwrap();
        assert_eq!(first.items, vec![1]);
        assert!(iterator.completed().await);

        for _ in 0..3 {
            let again = iterator.next_page().await.unwrap();
            assert!(again.is_empty());
            assert!(again.next.is_end());
        }
        assert_eq!(iterator.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn empty_page_terminates_even_with_live_token() {
        let fetcher = ScriptedFetcher::new(vec![page(vec![], Cursor::Next("more".into()))]);
        let iterator = CursorIterator::new(fetcher);

        let first = iterator.next_page().await.unwrap();
        assert!(first.is_empty());
        assert!(iterator.completed().await);
        assert!(iterator.next_page().await.unwrap().is_empty());
        assert_eq!(iterator.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn starting_at_the_end_sentinel_is_already_complete() {
        let fetcher = ScriptedFetcher::new(vec![page(vec![1], Cursor::End)]);
        let iterator = CursorIterator::with_cursor(fetcher, Cursor::End);

        assert!(iterator.completed().await);
        assert!(iterator.next_page().await.unwrap().is_empty());
        assert_eq!(iterator.fetcher.calls(), 0);
    }

    /// Fetcher that fails on its first call, then succeeds, recording the
    /// cursor each attempt saw.
    struct FlakyFetcher {
        calls: AtomicUsize,
        seen: StdMutex<Vec<Cursor>>,
    }

    #[async_trait]
    impl PageFetcher for FlakyFetcher {
        type Item = u64;

        async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<u64>> {
            self.seen.lock().unwrap().push(cursor.clone());
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(Error::Upstream {
                    status: 503,
                    message: "over capacity".into(),
                });
            }
            Ok(page(vec![9], Cursor::End))
        }
    }

    #[tokio::test]
    async fn fetch_failure_does_not_advance_the_cursor() {
        let iterator = CursorIterator::with_cursor(
            FlakyFetcher {
                calls: AtomicUsize::new(0),
                seen: StdMutex::new(Vec::new()),
            },
            Cursor::Next("pos".into()),
        );

        let err = iterator.next_page().await.unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 503, .. }));
        assert_eq!(iterator.current_cursor().await, Cursor::Next("pos".into()));

        let retried = iterator.next_page().await.unwrap();
        assert_eq!(retried.items, vec![9]);

        let seen = iterator.fetcher.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), [
            Cursor::Next("pos".into()),
            Cursor::Next("pos".into())
        ]);
    }

    /// Resolver that doubles ids, recording the size of each batch.
    struct DoublingResolver {
        cap: usize,
        batch_sizes: StdMutex<Vec<usize>>,
        fail_first: AtomicUsize,
    }

    impl DoublingResolver {
        fn new(cap: usize) -> Self {
            Self {
                cap,
                batch_sizes: StdMutex::new(Vec::new()),
                fail_first: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BatchResolver for DoublingResolver {
        type Id = u64;
        type Output = u64;

        fn max_batch_size(&self) -> usize {
            self.cap
        }

        async fn resolve(&self, ids: &[u64]) -> Result<Vec<u64>> {
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                return Err(Error::Upstream {
                    status: 500,
                    message: "lookup failed".into(),
                });
            }
            self.batch_sizes.lock().unwrap().push(ids.len());
            Ok(ids.iter().map(|id| id * 2).collect())
        }
    }

    #[tokio::test]
    async fn multi_level_preserves_order_across_batches() {
        let ids: Vec<u64> = (1..=250).collect();
        let outer = CursorIterator::new(ScriptedFetcher::new(vec![page(
            ids.clone(),
            Cursor::End,
        )]));
        let iterator = MultiLevelCursorIterator::new(outer, DoublingResolver::new(100));

        let resolved = iterator.next_page().await.unwrap();
        let expected: Vec<u64> = ids.iter().map(|id| id * 2).collect();
        assert_eq!(resolved.items, expected);
        assert!(resolved.next.is_end());

        let sizes = iterator.resolver.batch_sizes.lock().unwrap();
        assert_eq!(sizes.as_slice(), [100, 100, 50]);
    }

    #[tokio::test]
    async fn multi_level_resolve_failure_resumes_same_outer_page() {
        let outer = CursorIterator::new(ScriptedFetcher::new(vec![
            page(vec![1, 2, 3], Cursor::Next("a".into())),
            page(vec![4], Cursor::End),
        ]));
        let resolver = DoublingResolver::new(2);
        resolver.fail_first.store(1, Ordering::SeqCst);
        let iterator = MultiLevelCursorIterator::new(outer, resolver);

        // First attempt fails resolving; the outer page stays queued.
        assert!(iterator.next_page().await.is_err());
        assert_eq!(iterator.outer.fetcher.calls(), 1);

        // Retry resolves the queued page without re-fetching the outer cursor.
        let first = iterator.next_page().await.unwrap();
        assert_eq!(first.items, vec![2, 4, 6]);
        assert_eq!(iterator.outer.fetcher.calls(), 1);

        let second = iterator.next_page().await.unwrap();
        assert_eq!(second.items, vec![8]);
        assert!(second.next.is_end());
        assert!(iterator.completed().await);
    }

    #[tokio::test]
    async fn multi_level_completion_yields_empty_pages() {
        let outer = CursorIterator::new(ScriptedFetcher::new(vec![page(
            vec![1],
            Cursor::End,
        )]));
        let iterator = MultiLevelCursorIterator::new(outer, DoublingResolver::new(100));

        assert_eq!(iterator.next_page().await.unwrap().items, vec![2]);
        assert!(iterator.completed().await);
        assert!(iterator.next_page().await.unwrap().is_empty());
        assert_eq!(iterator.outer.fetcher.calls(), 1);
    }
}
