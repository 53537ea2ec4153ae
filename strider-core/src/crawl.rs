use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use strider_scanner::error::Result;
use strider_scanner::fetcher::DEFAULT_TIMEOUT_SECS;
use strider_scanner::{CrawlRecord, CrawlSession, Crawler, FailurePolicy, FetcherConfig};
use tracing::info;

pub const DEFAULT_STEP_BUDGET: i64 = 3;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub step_budget: i64,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
    pub failure_policy: FailurePolicy,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            step_budget: DEFAULT_STEP_BUDGET,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            failure_policy: FailurePolicy::Abort,
            show_progress_bars: false,
        }
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        let mut config = FetcherConfig {
            timeout_secs: self.timeout_secs,
            ..FetcherConfig::default()
        };
        if let Some(ref user_agent) = self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Execute a crawl with the given options
/// Returns the finished session
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlSession> {
    // Spinner for overall crawl progress (only if enabled)
    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let last_step = options.step_budget.max(0);
    let step_callback: strider_scanner::ProgressCallback = {
        let pb = progress_bar.clone();
        let progress_callback = progress_callback.clone();
        Arc::new(move |step: usize, url: String| {
            if let Some(ref pb) = pb {
                pb.set_message(format!("Step {}/{}: {}", step, last_step, url));
            }
            if let Some(ref callback) = progress_callback {
                callback(format!("[{}] {}", step, url));
            }
        })
    };

    let result_callback: strider_scanner::ResultCallback = {
        let pb = progress_bar.clone();
        Arc::new(move |record: CrawlRecord| {
            if let (Some(pb), Some(error)) = (&pb, &record.error) {
                pb.println(format!("[!] {} failed: {}", record.url, error));
            }
        })
    };

    let crawler = Crawler::with_config(options.fetcher_config())?
        .with_failure_policy(options.failure_policy)
        .with_progress_callback(step_callback)
        .with_result_callback(result_callback);

    let outcome = crawler.crawl(&options.url, options.step_budget).await;

    if let Some(ref pb) = progress_bar {
        match &outcome {
            Ok(session) => {
                pb.finish_with_message(format!("Crawl complete! {} pages fetched", session.len()))
            }
            Err(_) => pb.abandon_with_message("Crawl failed"),
        }
    }

    if let Ok(ref session) = outcome {
        info!("Session {} finished with {} records", session.id(), session.len());
    }

    outcome
}
