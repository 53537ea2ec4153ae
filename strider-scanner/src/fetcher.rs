use crate::error::{Result, ScanError};
use crate::extract::extract_signals;
use crate::record::CrawlRecord;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Transport settings for the page fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("strider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Performs a single GET per call and turns the response into a [`CrawlRecord`].
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_config(FetcherConfig::default())
    }

    pub fn with_config(config: FetcherConfig) -> Result<Self> {
        // Idle pool of zero: every step opens its own connection.
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.div_ceil(2)))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(ScanError::Client)?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<CrawlRecord> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScanError::transport(url, e))?;

        let status_code = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ScanError::transport(url, e))?;
        // The clock covers the whole response cycle, body included, but not extraction.
        let elapsed = start.elapsed();

        let signals = extract_signals(&body);
        debug!(
            "{} -> {} in {:?} ({} internal, {} external, {} images)",
            url,
            status_code,
            elapsed,
            signals.internal_links.len(),
            signals.external_links.len(),
            signals.images.len()
        );

        Ok(CrawlRecord::new(url.to_string(), status_code, elapsed, signals))
    }
}
