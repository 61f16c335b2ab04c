// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_path, format_result_line, load_table, resolve_table_root};

// Re-export crawl functionality from spindle-core
pub use spindle_core::crawl::{CrawlOptions, CrawlResultCallback, FetchSource, execute_crawl};
