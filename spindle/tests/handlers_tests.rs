use spindle::handlers::*;
use spindle_crawler::result::CrawlResult;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_resolve_table_root_defaults_to_demo() {
    let root = resolve_table_root(None, None).unwrap();
    assert_eq!(root, DEMO_ROOT);
}

#[test]
fn test_resolve_table_root_explicit() {
    let root = resolve_table_root(Some("graph.json"), Some("home")).unwrap();
    assert_eq!(root, "home");

    let root = resolve_table_root(None, Some("https://golang.org/pkg/")).unwrap();
    assert_eq!(root, "https://golang.org/pkg/");
}

#[test]
fn test_resolve_table_root_requires_root_for_file() {
    let result = resolve_table_root(Some("graph.json"), None);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("--root is required"));
}

#[test]
fn test_load_table_demo() {
    let table = load_table(None).unwrap();
    assert_eq!(table.len(), 4);
    assert!(table.contains(DEMO_ROOT));
}

#[test]
fn test_load_table_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(
        temp_file,
        r#"{{ "a": {{ "body": "A", "urls": ["b"] }}, "b": {{ "body": "B" }} }}"#
    )?;

    let path = temp_file.path().to_string_lossy().to_string();
    let table = load_table(Some(&path))?;

    assert_eq!(table.len(), 2);
    assert!(table.contains("a"));
    Ok(())
}

#[test]
fn test_load_table_empty_file_is_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{{}}").unwrap();

    let path = temp_file.path().to_string_lossy().to_string();
    let result = load_table(Some(&path));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No pages found"));
}

#[test]
fn test_load_table_missing_file() {
    let result = load_table(Some("/nonexistent/spindle/table.json"));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to load table"));
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/reports/out.txt");
    assert!(expanded.ends_with("reports/out.txt"));

    let plain = expand_path("/tmp/out.txt");
    assert_eq!(plain.to_string_lossy(), "/tmp/out.txt");
}

#[test]
fn test_format_result_line() {
    let found = CrawlResult::fetched(
        "https://golang.org/".to_string(),
        4,
        "The Go Programming Language".to_string(),
        vec![],
    );
    assert_eq!(
        format_result_line(&found),
        "found: https://golang.org/ \"The Go Programming Language\""
    );

    let failed = CrawlResult::with_error(
        "https://golang.org/cmd/".to_string(),
        3,
        "not found: https://golang.org/cmd/".to_string(),
    );
    assert_eq!(
        format_result_line(&failed),
        "failed: https://golang.org/cmd/: not found: https://golang.org/cmd/"
    );
}

#[test]
fn test_tally_results() {
    let results = vec![
        CrawlResult::fetched("a".to_string(), 2, "A".to_string(), vec!["c".to_string()]),
        CrawlResult::with_error("b".to_string(), 1, "not found: b".to_string()),
        CrawlResult::fetched("c".to_string(), 1, "C".to_string(), vec![]),
    ];
    assert_eq!(tally_results(&results), (2, 1));
    assert_eq!(tally_results(&[]), (0, 0));
}
