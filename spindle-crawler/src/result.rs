use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one fetch attempt. Exactly one of `body` / `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    /// Remaining depth when the page was fetched.
    pub depth: usize,
    pub body: Option<String>,
    pub links_found: Vec<String>,
    pub response_time: Duration,
    pub error: Option<String>,
}

impl CrawlResult {
    pub fn fetched(url: String, depth: usize, body: String, links_found: Vec<String>) -> Self {
        Self {
            url,
            depth,
            body: Some(body),
            links_found,
            response_time: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn with_error(url: String, depth: usize, error: String) -> Self {
        Self {
            url,
            depth,
            body: None,
            links_found: Vec::new(),
            response_time: Duration::from_secs(0),
            error: Some(error),
        }
    }

    pub fn with_response_time(mut self, response_time: Duration) -> Self {
        self.response_time = response_time;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_result_has_no_error() {
        let result = CrawlResult::fetched(
            "https://golang.org/".to_string(),
            4,
            "The Go Programming Language".to_string(),
            vec!["https://golang.org/pkg/".to_string()],
        );
        assert!(!result.is_failure());
        assert_eq!(result.body.as_deref(), Some("The Go Programming Language"));
        assert_eq!(result.links_found.len(), 1);
    }

    #[test]
    fn test_error_result_has_no_body() {
        let result = CrawlResult::with_error(
            "https://golang.org/cmd/".to_string(),
            3,
            "not found: https://golang.org/cmd/".to_string(),
        )
        .with_response_time(Duration::from_millis(5));
        assert!(result.is_failure());
        assert!(result.body.is_none());
        assert!(result.links_found.is_empty());
        assert_eq!(result.response_time, Duration::from_millis(5));
    }
}
