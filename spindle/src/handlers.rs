use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use spindle_core::crawl::{CrawlOptions, CrawlResultCallback, FetchSource, execute_crawl};
use spindle_core::report::{ReportFormat, gather_report_data, render_report, write_report};
use spindle_crawler::TableFetcher;
use spindle_crawler::result::CrawlResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

pub const DEMO_ROOT: &str = "https://golang.org/";

/// Install the fmt subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Load the table to crawl: the given JSON file, or the built-in demo
pub fn load_table(path: Option<&str>) -> Result<TableFetcher> {
    match path {
        Some(path) => {
            let path = expand_path(path);
            let table = TableFetcher::from_json_file(&path)
                .with_context(|| format!("Failed to load table {}", path.display()))?;
            if table.is_empty() {
                bail!("No pages found in {}", path.display());
            }
            Ok(table)
        }
        None => Ok(TableFetcher::golang_demo()),
    }
}

/// Pick the root address for a table crawl
pub fn resolve_table_root(table_path: Option<&str>, root: Option<&str>) -> Result<String> {
    match (table_path, root) {
        (_, Some(root)) => Ok(root.to_string()),
        (None, None) => Ok(DEMO_ROOT.to_string()),
        (Some(_), None) => Err(anyhow!("--root is required when crawling a table file")),
    }
}

/// Plain (uncolored) line for a single result
pub fn format_result_line(result: &CrawlResult) -> String {
    match (&result.error, &result.body) {
        (Some(reason), _) => format!("failed: {}: {}", result.url, reason),
        (None, body) => format!("found: {} {:?}", result.url, body.as_deref().unwrap_or("")),
    }
}

fn print_result(result: &CrawlResult) {
    let line = format_result_line(result);
    if result.is_failure() {
        eprintln!("{} {}", "✗".red().bold(), line.red());
    } else {
        println!("{} {}", "✓".green().bold(), line);
    }
}

/// Count of (fetched, failed) results
pub fn tally_results(results: &[CrawlResult]) -> (usize, usize) {
    let failed = results.iter().filter(|r| r.is_failure()).count();
    (results.len() - failed, failed)
}

fn live_result_callback(quiet: bool) -> Option<CrawlResultCallback> {
    if quiet {
        None
    } else {
        Some(Arc::new(|result: CrawlResult| print_result(&result)))
    }
}

fn report_format(args: &ArgMatches) -> ReportFormat {
    args.get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text)
}

fn emit_report(
    root: &str,
    max_depth: usize,
    results: &[CrawlResult],
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let (fetched, failed) = tally_results(results);
    info!(root, fetched, failed, "Crawl finished");

    let data = gather_report_data(root, max_depth, results);
    let report = render_report(&data, format).context("Failed to render report")?;

    match output {
        Some(path) => {
            write_report(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => {
            println!();
            print!("{}", report);
        }
    }
    Ok(())
}

pub async fn handle_crawl(args: &ArgMatches, quiet: bool) -> Result<()> {
    let url = args
        .get_one::<Url>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let max_depth = *args.get_one::<usize>("depth").unwrap_or(&3);
    let timeout_secs = *args.get_one::<u64>("timeout").unwrap_or(&10);
    let any_domain = args.get_flag("any-domain");
    let user_agent = args.get_one::<String>("user-agent").cloned();
    let output = args.get_one::<String>("output").map(|p| expand_path(p));

    if !quiet {
        println!("{} Crawling {}", "→".blue(), url.as_str().bright_white());
        println!("  Max depth: {}", max_depth);
        println!(
            "  Cross-domain: {}\n",
            if any_domain { "followed" } else { "ignored" }
        );
    }

    let options = CrawlOptions {
        url: url.as_str().to_string(),
        max_depth,
        source: FetchSource::Http {
            timeout_secs,
            same_domain: !any_domain,
            user_agent,
        },
        show_progress_bars: !quiet,
    };

    let results = execute_crawl(options, live_result_callback(quiet))
        .await
        .context("Crawl failed")?;

    emit_report(
        url.as_str(),
        max_depth,
        &results,
        report_format(args),
        output.as_deref(),
    )
}

pub async fn handle_table(args: &ArgMatches, quiet: bool) -> Result<()> {
    let table_path = args.get_one::<String>("PATH").map(|s| s.as_str());
    let root = resolve_table_root(table_path, args.get_one::<String>("root").map(|s| s.as_str()))?;
    let max_depth = *args.get_one::<usize>("depth").unwrap_or(&4);
    let output = args.get_one::<String>("output").map(|p| expand_path(p));
    let table = load_table(table_path)?;

    if !quiet {
        println!(
            "{} Crawling {} ({} pages in table)",
            "→".blue(),
            root.bright_white(),
            table.len()
        );
        println!("  Max depth: {}\n", max_depth);
    }

    let options = CrawlOptions {
        url: root.clone(),
        max_depth,
        source: FetchSource::Table(table),
        show_progress_bars: false,
    };

    let results = execute_crawl(options, live_result_callback(quiet))
        .await
        .context("Crawl failed")?;

    emit_report(
        &root,
        max_depth,
        &results,
        report_format(args),
        output.as_deref(),
    )
}
