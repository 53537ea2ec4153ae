// Report generation from a finished crawl session

use crate::stats::CrawlStats;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use strider_scanner::CrawlSession;
use thiserror::Error;

const HEAVY_RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output could not be flushed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Html,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "html" | "htm" => Some(ReportFormat::Html),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub session_id: String,
    pub seed_url: String,
    pub step_budget: i64,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    pub steps: Vec<StepRow>,
    pub stats: CrawlStats,
}

/// One line of the per-step table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRow {
    pub step: usize,
    pub url: String,
    pub status_code: Option<u16>,
    pub elapsed_seconds: f64,
    pub word_count: usize,
    pub title: String,
    pub internal_links: usize,
    pub external_links: usize,
    pub images: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn gather_report_data(session: &CrawlSession) -> ReportData {
    let steps = session
        .records()
        .iter()
        .enumerate()
        .map(|(step, record)| StepRow {
            step,
            url: record.url.clone(),
            status_code: record.status_code,
            elapsed_seconds: record.elapsed_seconds,
            word_count: record.word_count(),
            title: record.title.clone(),
            internal_links: record.internal_links.len(),
            external_links: record.external_links.len(),
            images: record.images.len(),
            error: record.error.clone(),
        })
        .collect();

    let duration_seconds = session.finished_at().map(|end| {
        let millis = (end - session.started_at()).num_milliseconds().max(0);
        millis as f64 / 1000.0
    });

    ReportData {
        session_id: session.id().to_string(),
        seed_url: session.seed_url().to_string(),
        step_budget: session.step_budget(),
        started_at: session.started_at().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        duration_seconds,
        steps,
        stats: CrawlStats::from_session(session),
    }
}

pub fn render_report(data: &ReportData, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(data)),
        ReportFormat::Json => Ok(generate_json_report(data)?),
        ReportFormat::Csv => generate_csv_report(data),
        ReportFormat::Html => Ok(generate_html_report(data)),
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    // Header
    report.push_str(HEAVY_RULE);
    report.push('\n');
    report.push_str("                           STRIDER CRAWL REPORT\n");
    report.push_str(HEAVY_RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Session ID:   {}\n", data.session_id));
    report.push_str(&format!("Seed:         {}\n", data.seed_url));
    report.push_str(&format!("Step budget:  {}\n", data.step_budget));
    report.push_str(&format!("Started:      {}\n", data.started_at));
    if let Some(duration) = data.duration_seconds {
        report.push_str(&format!("Duration:     {:.2} seconds\n", duration));
    }
    report.push('\n');

    // Per-step table
    if !data.steps.is_empty() {
        report.push_str(HEAVY_RULE);
        report.push('\n');
        report.push_str("PAGES\n");
        report.push_str(HEAVY_RULE);
        report.push_str("\n\n");

        report.push_str(&format!(
            "  {:>4}  {:>6}  {:>7}  {:>6}  {:>5}  {:>5}  {:>6}  {}\n",
            "STEP", "STATUS", "SECONDS", "WORDS", "INT", "EXT", "IMAGES", "TITLE / URL"
        ));

        for row in &data.steps {
            report.push_str(&format!(
                "  {:>4}  {}  {:>7.2}  {:>6}  {:>5}  {:>5}  {:>6}  {}\n",
                row.step,
                display_status(row.status_code),
                row.elapsed_seconds,
                row.word_count,
                row.internal_links,
                row.external_links,
                row.images,
                display_title(&row.title)
            ));
            report.push_str(&format!("{:>54}{}\n", "", row.url));
            if let Some(ref error) = row.error {
                report.push_str(&format!("{:>54}[!] {}\n", "", error));
            }
        }
        report.push('\n');
    }

    // Summary
    report.push_str(HEAVY_RULE);
    report.push('\n');
    report.push_str("SUMMARY\n");
    report.push_str(HEAVY_RULE);
    report.push_str("\n\n");

    let stats = &data.stats;
    report.push_str(&format!("  Pages crawled:            {}\n", stats.pages_crawled));
    report.push_str(&format!("  Unique images:            {}\n", stats.unique_images));
    report.push_str(&format!("  Unique internal links:    {}\n", stats.unique_internal_links));
    report.push_str(&format!("  Unique external links:    {}\n", stats.unique_external_links));
    report.push_str(&format!(
        "  Average response time:    {:.2}s\n",
        stats.average_elapsed_seconds
    ));
    report.push_str(&format!("  Average word count:       {}\n", stats.average_word_count));
    report.push_str(&format!("  Average title length:     {}\n", stats.average_title_length));
    report.push('\n');

    report.push_str(HEAVY_RULE);
    report.push('\n');
    report.push_str("\nGenerated by Strider\n");

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Strider",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "session": {
                "id": data.session_id,
                "seed_url": data.seed_url,
                "step_budget": data.step_budget,
                "started_at": data.started_at,
                "duration_seconds": data.duration_seconds
            },
            "summary": data.stats,
            "steps": data.steps
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(data: &ReportData) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "step",
        "status",
        "elapsed_seconds",
        "word_count",
        "internal_links",
        "external_links",
        "images",
        "title",
        "url",
        "error",
    ])?;

    for row in &data.steps {
        writer.write_record([
            &row.step.to_string(),
            &row.status_code.map(|code| code.to_string()).unwrap_or_default(),
            &format!("{:.2}", row.elapsed_seconds),
            &row.word_count.to_string(),
            &row.internal_links.to_string(),
            &row.external_links.to_string(),
            &row.images.to_string(),
            &row.title,
            &row.url,
            &row.error.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn generate_html_report(data: &ReportData) -> String {
    let stats = &data.stats;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Strider crawl report - {}</title>\n",
        html_escape::encode_text(&data.seed_url)
    ));
    html.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         table { border-collapse: collapse; }\n\
         th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }\n\
         td.num { text-align: right; }\n\
         .failed { color: #b00; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str("<h1>Strider crawl report</h1>\n");
    html.push_str(&format!(
        "<p>Session <code>{}</code> started {} from <a href=\"{}\">{}</a> with a budget of {} steps.</p>\n",
        html_escape::encode_text(&data.session_id),
        html_escape::encode_text(&data.started_at),
        html_escape::encode_double_quoted_attribute(&data.seed_url),
        html_escape::encode_text(&data.seed_url),
        data.step_budget
    ));

    html.push_str("<h2>Pages</h2>\n");
    if data.steps.is_empty() {
        html.push_str("<p>No pages were crawled.</p>\n");
    } else {
        html.push_str(
            "<table>\n<tr><th>Step</th><th>URL</th><th>Status</th><th>Seconds</th>\
             <th>Words</th><th>Internal</th><th>External</th><th>Images</th><th>Title</th></tr>\n",
        );
        for row in &data.steps {
            let status = match row.status_code {
                Some(code) => code.to_string(),
                None => format!(
                    "<span class=\"failed\" title=\"{}\">failed</span>",
                    html_escape::encode_double_quoted_attribute(
                        row.error.as_deref().unwrap_or("")
                    )
                ),
            };
            html.push_str(&format!(
                "<tr><td class=\"num\">{}</td><td>{}</td><td>{}</td><td class=\"num\">{:.2}</td>\
                 <td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
                 <td class=\"num\">{}</td><td>{}</td></tr>\n",
                row.step,
                html_escape::encode_text(&row.url),
                status,
                row.elapsed_seconds,
                row.word_count,
                row.internal_links,
                row.external_links,
                row.images,
                html_escape::encode_text(&row.title)
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("<h2>Summary</h2>\n<table>\n");
    let summary: [(&str, String); 7] = [
        ("Pages crawled", stats.pages_crawled.to_string()),
        ("Unique images", stats.unique_images.to_string()),
        ("Unique internal links", stats.unique_internal_links.to_string()),
        ("Unique external links", stats.unique_external_links.to_string()),
        ("Average response time (s)", format!("{:.2}", stats.average_elapsed_seconds)),
        ("Average word count", stats.average_word_count.to_string()),
        ("Average title length", stats.average_title_length.to_string()),
    ];
    for (label, value) in summary {
        html.push_str(&format!(
            "<tr><th>{}</th><td class=\"num\">{}</td></tr>\n",
            label, value
        ));
    }
    html.push_str("</table>\n</body>\n</html>\n");

    html
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

// Helper functions

fn display_status(status_code: Option<u16>) -> String {
    match status_code {
        Some(code) => format!("{:>6}", code),
        None => format!("{:>6}", "ERR"),
    }
}

fn display_title(title: &str) -> String {
    let single_line = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.is_empty() {
        "(untitled)".to_string()
    } else if single_line.chars().count() > 60 {
        let truncated: String = single_line.chars().take(57).collect();
        format!("{}...", truncated)
    } else {
        single_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_status_pads_codes() {
        assert_eq!(display_status(Some(200)), "   200");
        assert_eq!(display_status(None), "   ERR");
    }

    #[test]
    fn test_display_title_collapses_whitespace() {
        assert_eq!(display_title("  Hello\n   world "), "Hello world");
        assert_eq!(display_title(""), "(untitled)");
    }

    #[test]
    fn test_display_title_truncates_long_titles() {
        let title = "x".repeat(100);
        let shown = display_title(&title);
        assert_eq!(shown.chars().count(), 60);
        assert!(shown.ends_with("..."));
    }
}
