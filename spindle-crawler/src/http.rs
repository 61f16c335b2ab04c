use crate::error::{CrawlError, FetchError};
use crate::fetch::{Fetcher, Page};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));

const DEFAULT_SNIPPET_LEN: usize = 120;
pub const DEFAULT_USER_AGENT: &str = concat!("Spindle/", env!("CARGO_PKG_VERSION"));

/// Fetcher that performs real HTTP GETs and extracts `a[href]` links.
pub struct HttpFetcher {
    client: Client,
    base_domain: Option<String>,
    snippet_len: usize,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, CrawlError> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self, CrawlError> {
        Self::with_timeout_and_user_agent(timeout_secs, DEFAULT_USER_AGENT)
    }

    pub fn with_timeout_and_user_agent(
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            base_domain: None,
            snippet_len: DEFAULT_SNIPPET_LEN,
        })
    }

    /// Only report links whose host is `domain` or one of its subdomains.
    pub fn with_base_domain(mut self, domain: String) -> Self {
        self.base_domain = Some(domain);
        self
    }

    pub fn with_snippet_len(mut self, snippet_len: usize) -> Self {
        self.snippet_len = snippet_len;
        self
    }

    fn parse_page(&self, html: &str, current_url: &str) -> Page {
        let document = Html::parse_document(html);

        let mut links = Vec::new();
        for element in document.select(&LINK_SELECTOR) {
            if let Some(href) = element.value().attr("href")
                && let Some(absolute_url) = resolve_url(current_url, href)
            {
                match &self.base_domain {
                    Some(base) if !is_same_domain(&absolute_url, base) => {
                        debug!("Skipping cross-domain link {}", absolute_url);
                    }
                    _ => links.push(absolute_url),
                }
            }
        }

        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|t| normalize_whitespace(&t.text().collect::<String>()))
            .filter(|t| !t.is_empty());

        let body = match title {
            Some(title) => title,
            None => {
                let text = document.root_element().text().collect::<String>();
                truncate_chars(&normalize_whitespace(&text), self.snippet_len)
            }
        };

        Page::new(body, links)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        debug!("Fetching {}", address);
        Url::parse(address).map_err(|e| FetchError::InvalidAddress(format!("{}: {}", address, e)))?;

        let response = self.client.get(address).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                address: address.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("text/html"))
            .unwrap_or(false);

        // Links on a redirected page are relative to where we landed.
        let final_url = response.url().to_string();
        let body = response.text().await?;

        if is_html {
            Ok(self.parse_page(&body, &final_url))
        } else {
            Ok(Page::new(
                truncate_chars(&normalize_whitespace(&body), self.snippet_len),
                Vec::new(),
            ))
        }
    }
}

fn resolve_url(base: &str, href: &str) -> Option<String> {
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let base_url = Url::parse(base).ok()?;
    let mut url = base_url.join(href).ok()?;
    url.set_fragment(None);

    Some(url.to_string())
}

fn is_same_domain(url: &str, base_domain: &str) -> bool {
    if let Ok(parsed) = Url::parse(url)
        && let Some(host) = parsed.host_str()
    {
        return host == base_domain || host.ends_with(&format!(".{}", base_domain));
    }
    false
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
