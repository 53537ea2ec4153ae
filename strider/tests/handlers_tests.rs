use std::path::PathBuf;
use strider::handlers::*;
use strider::{CrawlOptions, ReportFormat};
use tempfile::TempDir;

#[test]
fn test_parse_report_format_known() {
    assert_eq!(parse_report_format("text"), Ok(ReportFormat::Text));
    assert_eq!(parse_report_format("json"), Ok(ReportFormat::Json));
    assert_eq!(parse_report_format("csv"), Ok(ReportFormat::Csv));
    assert_eq!(parse_report_format("HTML"), Ok(ReportFormat::Html));
}

#[test]
fn test_parse_report_format_unknown() {
    let result = parse_report_format("pdf");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown report format 'pdf'"));
}

#[test]
fn test_resolve_output_path_plain() {
    assert_eq!(
        resolve_output_path("reports/out.html"),
        PathBuf::from("reports/out.html")
    );
}

#[test]
fn test_resolve_output_path_expands_home() {
    let resolved = resolve_output_path("~/report.txt");
    assert!(resolved.ends_with("report.txt"));
    if std::env::var_os("HOME").is_some() {
        assert!(!resolved.to_string_lossy().starts_with('~'));
    }
}

#[test]
fn test_output_path_for_adds_missing_extension() {
    assert_eq!(
        output_path_for("reports/out", ReportFormat::Csv),
        PathBuf::from("reports/out.csv")
    );
    assert_eq!(
        output_path_for("reports/out", ReportFormat::Text),
        PathBuf::from("reports/out.txt")
    );
}

#[test]
fn test_output_path_for_keeps_explicit_extension() {
    assert_eq!(
        output_path_for("reports/out.log", ReportFormat::Html),
        PathBuf::from("reports/out.log")
    );
}

#[test]
fn test_init_logging_is_idempotent() {
    init_logging();
    init_logging();
}

#[tokio::test]
async fn test_run_crawl_zero_budget_writes_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("report.json");

    let mut options = CrawlOptions::new("http://127.0.0.1:9/");
    options.step_budget = 0;

    let written = run_crawl(options, ReportFormat::Json, Some(&path)).await?;
    assert_eq!(written.as_deref(), Some(path.as_path()));

    let content = std::fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(value["report"]["summary"]["pages_crawled"], 0);
    assert_eq!(value["report"]["summary"]["average_word_count"], 0);
    Ok(())
}

#[tokio::test]
async fn test_run_crawl_surfaces_transport_failure() {
    let mut options = CrawlOptions::new("not a url");
    options.step_budget = 1;
    options.timeout_secs = 1;

    let err = run_crawl(options, ReportFormat::Text, None).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to crawl not a url"));
}

#[tokio::test]
async fn test_run_crawl_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("report.txt");

    let mut options = CrawlOptions::new("http://127.0.0.1:9/");
    options.step_budget = -1;

    let err = run_crawl(options, ReportFormat::Text, Some(&path))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to write report"));
}
