pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod record;
pub mod session;

pub use crawler::{Crawler, FailurePolicy, ProgressCallback, ResultCallback};
pub use error::ScanError;
pub use extract::{PageSignals, extract_signals};
pub use fetcher::{Fetcher, FetcherConfig};
pub use record::CrawlRecord;
pub use session::CrawlSession;
