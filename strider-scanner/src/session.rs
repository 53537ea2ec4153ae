use crate::record::CrawlRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// State of one crawl run.
///
/// Records are stored in step order, so `records()[n]` is step `n`. Only the
/// crawler appends to a session; everything else sees it read-only.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSession {
    id: String,
    seed_url: String,
    step_budget: i64,
    itinerary: Vec<String>,
    records: Vec<CrawlRecord>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl CrawlSession {
    pub fn new(seed_url: &str, step_budget: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            seed_url: seed_url.to_string(),
            step_budget,
            itinerary: Vec::new(),
            records: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Build a finished session from records gathered elsewhere.
    ///
    /// The itinerary is taken from the first record with internal links, the
    /// same way a live crawl captures it.
    pub fn from_records(seed_url: &str, step_budget: i64, records: Vec<CrawlRecord>) -> Self {
        let mut session = Self::new(seed_url, step_budget);
        for record in records {
            session.push_record(record);
        }
        session.finish();
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }

    pub fn step_budget(&self) -> i64 {
        self.step_budget
    }

    pub fn itinerary(&self) -> &[String] {
        &self.itinerary
    }

    pub fn records(&self) -> &[CrawlRecord] {
        &self.records
    }

    pub fn record(&self, step: usize) -> Option<&CrawlRecord> {
        self.records.get(step)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Append the record for the next step. Returns the step index it was stored at.
    pub(crate) fn push_record(&mut self, record: CrawlRecord) -> usize {
        if self.itinerary.is_empty() && !record.internal_links.is_empty() {
            self.itinerary = record.internal_links.clone();
        }
        self.records.push(record);
        self.records.len() - 1
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_links(url: &str, links: &[&str]) -> CrawlRecord {
        let mut record = CrawlRecord::with_error(url.to_string(), String::new());
        record.error = None;
        record.status_code = Some(200);
        record.internal_links = links.iter().map(|l| l.to_string()).collect();
        record
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = CrawlSession::new("http://example.com/", 3);

        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
        assert!(session.itinerary().is_empty());
        assert!(session.finished_at().is_none());
        assert_eq!(session.step_budget(), 3);
        assert_eq!(session.seed_url(), "http://example.com/");
        assert!(Uuid::parse_str(session.id()).is_ok());
    }

    #[test]
    fn test_push_record_returns_step_index() {
        let mut session = CrawlSession::new("http://example.com/", 2);

        assert_eq!(session.push_record(record_with_links("a", &[])), 0);
        assert_eq!(session.push_record(record_with_links("b", &[])), 1);
        assert_eq!(session.record(1).map(|r| r.url.as_str()), Some("b"));
        assert!(session.record(2).is_none());
    }

    #[test]
    fn test_itinerary_captured_once() {
        let mut session = CrawlSession::new("http://example.com/", 2);

        session.push_record(record_with_links("seed", &["one", "two"]));
        session.push_record(record_with_links("next", &["three"]));

        assert_eq!(session.itinerary(), &["one", "two"]);
    }

    #[test]
    fn test_itinerary_waits_for_first_non_empty_capture() {
        let mut session = CrawlSession::new("http://example.com/", 2);

        session.push_record(record_with_links("seed", &[]));
        assert!(session.itinerary().is_empty());

        session.push_record(record_with_links("next", &["late"]));
        assert_eq!(session.itinerary(), &["late"]);
    }

    #[test]
    fn test_from_records_is_finished() {
        let session = CrawlSession::from_records(
            "http://example.com/",
            1,
            vec![record_with_links("seed", &["about"]), record_with_links("about", &[])],
        );

        assert_eq!(session.len(), 2);
        assert_eq!(session.itinerary(), &["about"]);
        assert!(session.finished_at().is_some());
    }
}
