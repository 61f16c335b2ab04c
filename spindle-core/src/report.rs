// Report generation from crawl results

use serde::{Deserialize, Serialize};
use spindle_crawler::result::CrawlResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub root: String,
    pub max_depth: usize,
    pub pages: Vec<PageEntry>,
    pub failures: Vec<FailureEntry>,
    pub total_links: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub url: String,
    pub body: String,
    pub depth: usize,
    pub links: usize,
    pub response_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    pub url: String,
    pub reason: String,
    pub depth: usize,
}

/// Split results into fetched pages and failures, each sorted by URL.
pub fn gather_report_data(root: &str, max_depth: usize, results: &[CrawlResult]) -> ReportData {
    let mut pages = Vec::new();
    let mut failures = Vec::new();

    for result in results {
        match result.error {
            Some(ref reason) => failures.push(FailureEntry {
                url: result.url.clone(),
                reason: reason.clone(),
                depth: result.depth,
            }),
            None => pages.push(PageEntry {
                url: result.url.clone(),
                body: result.body.clone().unwrap_or_default(),
                depth: result.depth,
                links: result.links_found.len(),
                response_ms: result.response_time.as_millis(),
            }),
        }
    }

    pages.sort_by(|a, b| a.url.cmp(&b.url));
    failures.sort_by(|a, b| a.url.cmp(&b.url));
    let total_links = pages.iter().map(|p| p.links).sum();

    ReportData {
        root: root.to_string(),
        max_depth,
        pages,
        failures,
        total_links,
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Root: {}\n", data.root));
    report.push_str(&format!("  Max depth: {}\n", data.max_depth));
    report.push_str(&format!("  Pages fetched: {}\n", data.pages.len()));
    report.push_str(&format!("  Fetch failures: {}\n", data.failures.len()));
    report.push_str(&format!("  Total links found: {}\n", data.total_links));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for page in &data.pages {
        report.push_str(&format!("found: {} {:?}\n", page.url, page.body));
    }

    if !data.failures.is_empty() {
        report.push('\n');
        for failure in &data.failures {
            report.push_str(&format!("failed: {}: {}\n", failure.url, failure.reason));
        }
    }

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Spindle",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "crawl": {
                "root": data.root,
                "max_depth": data.max_depth
            },
            "summary": {
                "pages_fetched": data.pages.len(),
                "fetch_failures": data.failures.len(),
                "total_links": data.total_links
            },
            "pages": data.pages,
            "failures": data.failures
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn render_report(data: &ReportData, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(data)),
        ReportFormat::Json => generate_json_report(data),
    }
}

pub fn write_report(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
