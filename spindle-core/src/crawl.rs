use indicatif::{ProgressBar, ProgressStyle};
use spindle_crawler::error::{CrawlError, Result};
use spindle_crawler::result::CrawlResult;
use spindle_crawler::{Crawler, Fetcher, HttpFetcher, TableFetcher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub max_depth: usize,
    pub source: FetchSource,
    pub show_progress_bars: bool,
}

/// Where pages come from
pub enum FetchSource {
    /// Real HTTP fetches
    Http {
        timeout_secs: u64,
        same_domain: bool,
        user_agent: Option<String>,
    },
    /// A static address -> page table
    Table(TableFetcher),
}

/// Callback for reporting individual crawl results as they come in
pub type CrawlResultCallback = Arc<dyn Fn(CrawlResult) + Send + Sync>;

/// Execute a crawl with the given options
/// Returns the crawl results once every branch has finished
pub async fn execute_crawl(
    options: CrawlOptions,
    result_callback: Option<CrawlResultCallback>,
) -> Result<Vec<CrawlResult>> {
    let CrawlOptions {
        url,
        max_depth,
        source,
        show_progress_bars,
    } = options;

    match source {
        FetchSource::Http {
            timeout_secs,
            same_domain,
            user_agent,
        } => {
            let parsed = Url::parse(&url).map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", url, e)))?;
            let mut fetcher = match user_agent {
                Some(ref agent) => HttpFetcher::with_timeout_and_user_agent(timeout_secs, agent)?,
                None => HttpFetcher::with_timeout(timeout_secs)?,
            };
            if same_domain {
                let host = parsed
                    .host_str()
                    .ok_or_else(|| CrawlError::InvalidUrl(format!("{}: missing host", url)))?;
                fetcher = fetcher.with_base_domain(host.to_string());
            }
            Ok(run_crawl(fetcher, &url, max_depth, show_progress_bars, result_callback).await)
        }
        FetchSource::Table(table) => {
            Ok(run_crawl(table, &url, max_depth, show_progress_bars, result_callback).await)
        }
    }
}

async fn run_crawl<F: Fetcher + 'static>(
    fetcher: F,
    url: &str,
    max_depth: usize,
    show_progress_bars: bool,
    result_callback: Option<CrawlResultCallback>,
) -> Vec<CrawlResult> {
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));

    let count_clone = processed_count.clone();
    let pb_clone = progress_bar.clone();
    let internal_callback: spindle_crawler::ResultCallback = Arc::new(move |result: CrawlResult| {
        let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Result {} for {}", count, result.url);

        match (&pb_clone, &result_callback) {
            (Some(pb), Some(cb)) => {
                pb.set_message(format!("Crawling... {} pages processed", count));
                pb.suspend(|| cb(result));
            }
            (Some(pb), None) => {
                pb.set_message(format!("Crawling... {} pages processed", count));
            }
            (None, Some(cb)) => cb(result),
            (None, None) => {}
        }
    });

    let crawler = Crawler::new(fetcher)
        .with_max_depth(max_depth)
        .with_result_callback(internal_callback);

    let results = crawler.crawl(url).await;

    if let Some(ref pb) = progress_bar {
        let total = processed_count.load(Ordering::Relaxed);
        pb.finish_and_clear();
        debug!("Crawl complete! {} pages processed", total);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_execute_crawl_rejects_invalid_http_url() {
        let options = CrawlOptions {
            url: "not a url".to_string(),
            max_depth: 2,
            source: FetchSource::Http {
                timeout_secs: 1,
                same_domain: true,
                user_agent: None,
            },
            show_progress_bars: false,
        };

        let result = execute_crawl(options, None).await;
        assert!(matches!(result, Err(CrawlError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_execute_crawl_forwards_results() {
        let seen = Arc::new(Mutex::new(0usize));
        let seen_clone = seen.clone();

        let options = CrawlOptions {
            url: "https://golang.org/".to_string(),
            max_depth: 4,
            source: FetchSource::Table(TableFetcher::golang_demo()),
            show_progress_bars: false,
        };

        let results = execute_crawl(
            options,
            Some(Arc::new(move |_result: CrawlResult| {
                *seen_clone.lock().unwrap() += 1;
            })),
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 5);
        assert_eq!(*seen.lock().unwrap(), 5);
    }
}
