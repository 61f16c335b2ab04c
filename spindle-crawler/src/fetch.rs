use crate::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A fetched page: its body and the addresses it links to, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub body: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

impl Page {
    pub fn new(body: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            body: body.into(),
            urls,
        }
    }
}

/// Fetch capability injected into the crawler.
///
/// Implementations must tolerate concurrent calls from many tasks.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        (**self).fetch(address).await
    }
}
