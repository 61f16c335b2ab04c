pub mod crawler;
pub mod error;
pub mod fetch;
pub mod http;
pub mod result;
pub mod table;
pub mod tracker;
pub mod visited;

pub use crawler::{Crawler, ResultCallback};
pub use error::{CrawlError, FetchError};
pub use fetch::{Fetcher, Page};
pub use http::HttpFetcher;
pub use result::CrawlResult;
pub use table::TableFetcher;
pub use tracker::{WorkGuard, WorkTracker};
pub use visited::VisitedSet;
