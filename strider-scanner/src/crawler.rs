use crate::error::{Result, ScanError};
use crate::fetcher::{Fetcher, FetcherConfig};
use crate::record::CrawlRecord;
use crate::session::CrawlSession;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;
pub type ResultCallback = Arc<dyn Fn(CrawlRecord) + Send + Sync>;

/// What to do when a step's fetch fails outright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the crawl and return the transport error
    #[default]
    Abort,
    /// Store an empty record carrying the error and move on to the next step
    Degrade,
}

/// Walks a single chain of pages from a seed URL.
///
/// Step 0 fetches the seed. The internal links found there become the
/// itinerary, and step `n` fetches `seed_url + itinerary[n - 1]`. Steps run
/// from 0 through `step_budget` inclusive, one at a time.
pub struct Crawler {
    fetcher: Fetcher,
    failure_policy: FailurePolicy,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Self::with_config(FetcherConfig::default())
    }

    pub fn with_config(config: FetcherConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::with_config(config)?,
            failure_policy: FailurePolicy::default(),
            progress_callback: None,
            result_callback: None,
        })
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    pub async fn crawl(&self, seed_url: &str, step_budget: i64) -> Result<CrawlSession> {
        let mut session = CrawlSession::new(seed_url, step_budget);

        if step_budget <= 0 {
            warn!(
                "Step budget {} is not positive, nothing to crawl for {}",
                step_budget, seed_url
            );
            session.finish();
            return Ok(session);
        }

        info!("Starting crawl of {} with a budget of {} steps", seed_url, step_budget);

        let mut step: i64 = 0;
        while step <= step_budget {
            let url = if step == 0 {
                seed_url.to_string()
            } else {
                let fragment = session
                    .itinerary()
                    .get((step - 1) as usize)
                    .ok_or(ScanError::ItineraryExhausted {
                        required: step_budget,
                        available: session.itinerary().len(),
                    })?;
                format!("{}{}", seed_url, fragment)
            };

            if let Some(ref callback) = self.progress_callback {
                callback(step as usize, url.clone());
            }

            let record = match self.fetcher.fetch(&url).await {
                Ok(record) => record,
                Err(e) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Degrade => {
                        warn!("Step {} failed, recording empty page: {}", step, e);
                        CrawlRecord::with_error(url.clone(), e.to_string())
                    }
                },
            };

            let had_itinerary = !session.itinerary().is_empty();
            let index = session.push_record(record.clone());
            if !had_itinerary && !session.itinerary().is_empty() {
                debug!(
                    "Captured itinerary of {} links at step {}",
                    session.itinerary().len(),
                    index
                );
            }

            if let Some(ref callback) = self.result_callback {
                callback(record);
            }

            step += 1;
        }

        session.finish();
        info!("Crawl complete. Fetched {} pages", session.len());
        Ok(session)
    }
}
