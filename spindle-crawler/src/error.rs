use thiserror::Error;

/// Failure of a single fetch. Local to the branch that produced it.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{address} returned status {status}")]
    Status { address: String, status: u16 },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors raised around a crawl (setup, table loading), never by the
/// coordinator itself.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Table parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
