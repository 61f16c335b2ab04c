use crate::error::{FetchError, Result};
use crate::fetch::{Fetcher, Page};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Fetcher backed by a static address -> page table.
///
/// Addresses missing from the table fail with [`FetchError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct TableFetcher {
    pages: HashMap<String, Page>,
}

impl TableFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: impl Into<String>, page: Page) {
        self.pages.insert(address.into(), page);
    }

    pub fn with_page(mut self, address: &str, body: &str, urls: &[&str]) -> Self {
        self.insert(
            address,
            Page::new(body, urls.iter().map(|u| u.to_string()).collect()),
        );
        self
    }

    /// Parse a JSON object of the form `{ "<address>": { "body": "...", "urls": [...] } }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let pages: HashMap<String, Page> = serde_json::from_str(json)?;
        Ok(Self { pages })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.pages.contains_key(address)
    }

    /// The canned golang.org graph. `https://golang.org/cmd/` is linked but
    /// absent, so crawling it exercises the failure path.
    pub fn golang_demo() -> Self {
        Self::new()
            .with_page(
                "https://golang.org/",
                "The Go Programming Language",
                &["https://golang.org/pkg/", "https://golang.org/cmd/"],
            )
            .with_page(
                "https://golang.org/pkg/",
                "Packages",
                &[
                    "https://golang.org/",
                    "https://golang.org/cmd/",
                    "https://golang.org/pkg/fmt/",
                    "https://golang.org/pkg/os/",
                ],
            )
            .with_page(
                "https://golang.org/pkg/fmt/",
                "Package fmt",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
            .with_page(
                "https://golang.org/pkg/os/",
                "Package os",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
    }
}

#[async_trait]
impl Fetcher for TableFetcher {
    async fn fetch(&self, address: &str) -> std::result::Result<Page, FetchError> {
        self.pages
            .get(address)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(address.to_string()))
    }
}
