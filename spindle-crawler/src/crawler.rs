use crate::fetch::Fetcher;
use crate::result::CrawlResult;
use crate::tracker::{WorkGuard, WorkTracker};
use crate::visited::VisitedSet;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Receives every result (fetched or failed) as soon as it is produced.
pub type ResultCallback = Arc<dyn Fn(CrawlResult) + Send + Sync>;

/// Depth-bounded crawler that spawns one task per discovered link.
///
/// Fan-out is unbounded: every newly claimed link becomes its own task, and
/// [`Crawler::crawl`] returns once the whole task graph has drained.
pub struct Crawler<F> {
    fetcher: Arc<F>,
    max_depth: usize,
    result_callback: Option<ResultCallback>,
}

/// State shared by every branch of one crawl.
struct CrawlContext<F> {
    fetcher: Arc<F>,
    visited: Arc<VisitedSet>,
    tracker: WorkTracker,
    results: Mutex<Vec<CrawlResult>>,
    result_callback: Option<ResultCallback>,
}

impl<F: Fetcher + 'static> Crawler<F> {
    pub fn new(fetcher: F) -> Self {
        Self::from_arc(Arc::new(fetcher))
    }

    pub fn from_arc(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            max_depth: 3,
            result_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Crawl from `start_url` with the configured maximum depth.
    pub async fn crawl(&self, start_url: &str) -> Vec<CrawlResult> {
        self.crawl_with_depth(start_url, self.max_depth).await
    }

    pub async fn crawl_with_depth(&self, start_url: &str, depth: usize) -> Vec<CrawlResult> {
        self.crawl_shared(start_url, depth, Arc::new(VisitedSet::new()))
            .await
    }

    /// Crawl using a caller-owned visited set, which stays inspectable
    /// after the crawl returns.
    pub async fn crawl_shared(
        &self,
        start_url: &str,
        depth: usize,
        visited: Arc<VisitedSet>,
    ) -> Vec<CrawlResult> {
        info!("Starting crawl of {} with max depth {}", start_url, depth);
        let started = Instant::now();

        let ctx = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            visited,
            tracker: WorkTracker::new(),
            results: Mutex::new(Vec::new()),
            result_callback: self.result_callback.clone(),
        });

        dispatch(Arc::clone(&ctx), start_url.to_string(), depth);
        ctx.tracker.wait().await;

        let results = std::mem::take(&mut *ctx.results.lock().await);
        let failures = results.iter().filter(|r| r.is_failure()).count();
        info!(
            "Crawl complete. Fetched {} pages ({} failed) in {:?}",
            results.len() - failures,
            failures,
            started.elapsed()
        );
        results
    }
}

/// Register a unit of work, then spawn the branch that owns it.
fn dispatch<F: Fetcher + 'static>(ctx: Arc<CrawlContext<F>>, address: String, depth: usize) {
    let guard = ctx.tracker.register();
    tokio::spawn(visit(ctx, address, depth, guard));
}

fn visit<F: Fetcher + 'static>(
    ctx: Arc<CrawlContext<F>>,
    address: String,
    depth: usize,
    guard: WorkGuard,
) -> BoxFuture<'static, ()> {
    async move {
        // Completes this unit of work on every exit path.
        let _guard = guard;

        if depth == 0 {
            debug!("Depth exhausted at {}", address);
            return;
        }

        if !ctx.visited.claim(&address).await {
            debug!("Already visited {}", address);
            return;
        }

        let start = Instant::now();
        let fetched = ctx.fetcher.fetch(&address).await;
        let response_time = start.elapsed();

        match fetched {
            Ok(page) => {
                debug!(
                    "Fetched {} (depth {}), fanning out to {} links",
                    address,
                    depth,
                    page.urls.len()
                );
                let links = page.urls.clone();
                ctx.report(
                    CrawlResult::fetched(address, depth, page.body, page.urls)
                        .with_response_time(response_time),
                )
                .await;

                for link in links {
                    dispatch(Arc::clone(&ctx), link, depth - 1);
                }
            }
            Err(e) => {
                warn!("Crawl error for {}: {}", address, e);
                ctx.report(
                    CrawlResult::with_error(address, depth, e.to_string())
                        .with_response_time(response_time),
                )
                .await;
            }
        }
    }
    .boxed()
}

impl<F> CrawlContext<F> {
    async fn report(&self, result: CrawlResult) {
        if let Some(ref callback) = self.result_callback {
            callback(result.clone());
        }
        self.results.lock().await.push(result);
    }
}
