use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strider_core::crawl::{
    CrawlOptions, CrawlProgressCallback, DEFAULT_STEP_BUDGET, execute_crawl,
};
use strider_core::report::{ReportFormat, gather_report_data, render_report, save_report};
use strider_scanner::FailurePolicy;
use strider_scanner::fetcher::DEFAULT_TIMEOUT_SECS;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Filters come from `RUST_LOG` and default to `warn`. Output goes to stderr
/// so it never interleaves with a report printed on stdout.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed (tests call this repeatedly); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse a report format name given on the command line
pub fn parse_report_format(name: &str) -> Result<ReportFormat, String> {
    ReportFormat::from_str(name).ok_or_else(|| {
        format!(
            "Unknown report format '{}' (expected text, json, csv or html)",
            name
        )
    })
}

/// Expand `~` and environment variables in a user supplied output path
pub fn resolve_output_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(raw),
    }
}

/// Resolve the output path and give it the report format's extension when it has none
pub fn output_path_for(raw: &str, format: ReportFormat) -> PathBuf {
    let mut path = resolve_output_path(raw);
    if path.extension().is_none() {
        path.set_extension(format.extension());
    }
    path
}

/// Pull crawl options out of the `crawl` subcommand's arguments
pub fn crawl_options_from_args(sub_matches: &ArgMatches) -> CrawlOptions {
    let url = sub_matches
        .get_one::<String>("url")
        .cloned()
        .unwrap_or_default();

    let mut options = CrawlOptions::new(url);
    options.step_budget = *sub_matches
        .get_one::<i64>("depth")
        .unwrap_or(&DEFAULT_STEP_BUDGET);
    options.timeout_secs = *sub_matches
        .get_one::<u64>("timeout")
        .unwrap_or(&DEFAULT_TIMEOUT_SECS);
    options.user_agent = sub_matches.get_one::<String>("user-agent").cloned();
    options.failure_policy = if sub_matches.get_flag("keep-going") {
        FailurePolicy::Degrade
    } else {
        FailurePolicy::Abort
    };
    options.show_progress_bars = !sub_matches.get_flag("no-progress");
    options
}

/// Run a crawl and render its report.
///
/// With an output path the report is written there and the path is returned,
/// otherwise the rendered report is printed to stdout.
pub async fn run_crawl(
    options: CrawlOptions,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let seed = options.url.clone();
    let progress = if options.show_progress_bars {
        None
    } else {
        Some(plain_progress())
    };
    let session = execute_crawl(options, progress)
        .await
        .with_context(|| format!("Failed to crawl {}", seed))?;

    let data = gather_report_data(&session);
    let report = render_report(&data, format).context("Failed to render report")?;

    match output {
        Some(path) => {
            save_report(&report, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            debug!("Report written to {}", path.display());
            Ok(Some(path.to_path_buf()))
        }
        None => {
            print!("{}", report);
            Ok(None)
        }
    }
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    init_logging();

    let options = crawl_options_from_args(sub_matches);

    let format_name = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = match parse_report_format(format_name) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let output = sub_matches
        .get_one::<String>("output")
        .map(|raw| output_path_for(raw, format));

    // Print crawl configuration
    eprintln!("\n{} {}", "Crawling".bright_cyan().bold(), options.url);
    eprintln!("Step budget: {}", options.step_budget);
    eprintln!("Timeout: {}s", options.timeout_secs);
    let policy_str = match options.failure_policy {
        FailurePolicy::Abort => "abort on first failed fetch",
        FailurePolicy::Degrade => "record failed fetches and keep going",
    };
    eprintln!("Failures: {}\n", policy_str);

    match run_crawl(options, format, output.as_deref()).await {
        Ok(Some(path)) => {
            eprintln!("{} Report saved to {}", "✓".green().bold(), path.display());
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Progress printer used when the spinner is disabled
pub fn plain_progress() -> CrawlProgressCallback {
    Arc::new(|msg: String| {
        eprintln!("{}", msg);
    })
}
