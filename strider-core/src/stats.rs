// Aggregate figures over a finished crawl session

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strider_scanner::record::round_seconds;
use strider_scanner::{CrawlRecord, CrawlSession};

/// Summary numbers for a crawl.
///
/// Averages are divided by the session's step budget rather than by the
/// number of pages actually fetched. A non-positive budget gives zero for
/// every average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub pages_crawled: usize,
    pub unique_images: usize,
    pub unique_internal_links: usize,
    pub unique_external_links: usize,
    pub average_elapsed_seconds: f64,
    pub average_word_count: u64,
    pub average_title_length: u64,
}

impl CrawlStats {
    pub fn from_session(session: &CrawlSession) -> Self {
        Self::from_records(session.records(), session.step_budget())
    }

    pub fn from_records(records: &[CrawlRecord], step_budget: i64) -> Self {
        let unique_images = unique_count(records.iter().map(|r| &r.images));
        let unique_internal_links = unique_count(records.iter().map(|r| &r.internal_links));
        let unique_external_links = unique_count(records.iter().map(|r| &r.external_links));

        let (average_elapsed_seconds, average_word_count, average_title_length) =
            if step_budget <= 0 {
                (0.0, 0, 0)
            } else {
                let total_elapsed: f64 = records.iter().map(|r| r.elapsed_seconds).sum();
                let total_words: u64 = records.iter().map(|r| r.word_count() as u64).sum();
                let total_title_chars: u64 =
                    records.iter().map(|r| r.title.chars().count() as u64).sum();
                let budget = step_budget as u64;

                (
                    round_seconds(total_elapsed / step_budget as f64),
                    total_words / budget,
                    total_title_chars / budget,
                )
            };

        Self {
            pages_crawled: records.len(),
            unique_images,
            unique_internal_links,
            unique_external_links,
            average_elapsed_seconds,
            average_word_count,
            average_title_length,
        }
    }
}

fn unique_count<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> usize {
    lists
        .flat_map(|list| list.iter().map(String::as_str))
        .collect::<HashSet<&str>>()
        .len()
}
