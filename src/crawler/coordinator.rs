//! Crawl coordination
//!
//! One crawl is one task tree: the root task is spawned for the root URL,
//! and every successfully fetched page spawns one child task per outbound
//! link with one less unit of depth budget. Spawn decisions race, so
//! several tasks may be spawned for the same URL; nothing is checked at
//! spawn time, and the shared [`VisitedSet`] lets exactly one of them
//! proceed while the rest stand down without fetching.
//!
//! All state a crawl shares (visited set, completion counter, output
//! sinks) lives in a per-crawl context behind an `Arc`, never in
//! process-wide globals, so independent crawls can run concurrently in
//! one process.

use crate::crawler::completion::TaskCounter;
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::visited::VisitedSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;

/// A page the crawl fetched successfully
#[derive(Debug, Clone)]
pub struct CrawledPage {
    pub url: String,
    pub content: String,
}

/// A fetch that failed, terminating its branch only
#[derive(Debug)]
pub struct CrawlFailure {
    pub url: String,
    pub error: FetchError,
}

/// Everything a crawl's tasks share
struct CrawlContext<F: ?Sized> {
    fetcher: Arc<F>,
    visited: Arc<VisitedSet>,
    counter: TaskCounter,
    pages: mpsc::UnboundedSender<CrawledPage>,
    failures: mpsc::UnboundedSender<CrawlFailure>,
}

/// A running crawl: receivers for both output streams plus completion
/// detection.
///
/// Pages and failures arrive in nondeterministic concurrent order. Both
/// channels close once every task has finished.
pub struct CrawlSession {
    pub pages: mpsc::UnboundedReceiver<CrawledPage>,
    pub failures: mpsc::UnboundedReceiver<CrawlFailure>,
    visited: Arc<VisitedSet>,
    counter: TaskCounter,
}

impl CrawlSession {
    /// Launches a crawl of `root` to at most `max_depth` levels
    ///
    /// Registers the root's unit of work with the completion counter
    /// before spawning it, mirroring the obligation every task has for
    /// its own children.
    pub fn spawn<F>(fetcher: F, root: &str, max_depth: u32) -> Self
    where
        F: Fetcher + 'static,
    {
        let (pages_tx, pages_rx) = mpsc::unbounded_channel();
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();
        let counter = TaskCounter::new();
        let visited = Arc::new(VisitedSet::new());

        let context = Arc::new(CrawlContext {
            fetcher: Arc::new(fetcher),
            visited: visited.clone(),
            counter: counter.clone(),
            pages: pages_tx,
            failures: failures_tx,
        });

        tracing::info!("starting crawl of {} (max depth {})", root, max_depth);
        context.counter.add(1);
        tokio::spawn(crawl_task(context, root.to_string(), max_depth));

        Self {
            pages: pages_rx,
            failures: failures_rx,
            visited,
            counter,
        }
    }

    /// Resolves when every spawned task has finished.
    pub async fn wait(&self) {
        self.counter.wait().await;
    }

    /// The crawl's visited set, for inspecting claims and submission
    /// counts.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Drains both output streams into a [`CrawlReport`].
    pub async fn collect(mut self) -> CrawlReport {
        let mut pages = Vec::new();
        let mut failures = Vec::new();

        // Both channels close when the last task drops the context, so
        // plain drains cannot hang.
        while let Some(page) = self.pages.recv().await {
            pages.push(page);
        }
        while let Some(failure) = self.failures.recv().await {
            failures.push(failure);
        }

        CrawlReport { pages, failures }
    }
}

/// The collected outcome of one crawl
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub pages: Vec<CrawledPage>,
    pub failures: Vec<CrawlFailure>,
}

/// Crawls `root` to at most `max_depth` levels and collects the results
///
/// # Arguments
///
/// * `fetcher` - Capability used to retrieve each page
/// * `root` - URL the crawl starts from
/// * `max_depth` - Recursion budget; 0 means nothing is fetched
///
/// # Returns
///
/// A [`CrawlReport`] with every fetched page and every failed fetch. Page
/// order varies between runs; the set of pages does not.
pub async fn crawl<F>(fetcher: F, root: &str, max_depth: u32) -> CrawlReport
where
    F: Fetcher + 'static,
{
    let session = CrawlSession::spawn(fetcher, root, max_depth);
    session.collect().await
}

/// One task's body. Spawned once per (url, depth budget) pair; recursion
/// goes through `tokio::spawn`, so the future is boxed.
fn crawl_task<F>(
    context: Arc<CrawlContext<F>>,
    url: String,
    depth_remaining: u32,
) -> Pin<Box<dyn Future<Output = ()> + Send>>
where
    F: Fetcher + 'static,
{
    Box::pin(async move {
        // Declared first so the decrement fires on every exit path below.
        let _finished = context.counter.guard();

        // The visited check runs before the depth check: a URL first
        // reached with an exhausted budget is still claimed, and later
        // deeper-budget routes to it will stand down.
        if context.visited.check_and_mark(&url) {
            tracing::debug!("skipping {}: already claimed", url);
            return;
        }

        if depth_remaining == 0 {
            tracing::debug!("skipping {}: depth budget exhausted", url);
            return;
        }

        let page = match context.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!("fetch failed for {}: {}", url, error);
                let _ = context.failures.send(CrawlFailure { url, error });
                return;
            }
        };

        tracing::debug!("fetched {} ({} outbound links)", url, page.links.len());
        let _ = context.pages.send(CrawledPage {
            url,
            content: page.content,
        });

        for link in page.links {
            context.counter.add(1);
            tokio::spawn(crawl_task(context.clone(), link, depth_remaining - 1));
        }
    })
}
