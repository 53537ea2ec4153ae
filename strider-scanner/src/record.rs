use crate::extract::PageSignals;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One fetched page and the signals pulled out of its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRecord {
    pub url: String,
    pub elapsed_seconds: f64,
    pub status_code: Option<u16>,
    pub title: String,
    pub word_text: String,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub images: Vec<String>,
    pub error: Option<String>,
}

impl CrawlRecord {
    pub fn new(url: String, status_code: u16, elapsed: Duration, signals: PageSignals) -> Self {
        Self {
            url,
            elapsed_seconds: round_seconds(elapsed.as_secs_f64()),
            status_code: Some(status_code),
            title: signals.title,
            word_text: signals.word_text,
            internal_links: signals.internal_links,
            external_links: signals.external_links,
            images: signals.images,
            error: None,
        }
    }

    /// Placeholder for a step whose fetch failed outright.
    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            elapsed_seconds: 0.0,
            status_code: None,
            title: String::new(),
            word_text: String::new(),
            internal_links: Vec::new(),
            external_links: Vec::new(),
            images: Vec::new(),
            error: Some(error),
        }
    }

    pub fn word_count(&self) -> usize {
        self.word_text.split_whitespace().count()
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Round to two decimal places, clamping anything negative to zero.
pub fn round_seconds(seconds: f64) -> f64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0.0;
    }
    (seconds * 100.0).round() / 100.0
}
