use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Insufficient links to traverse: {required} steps requested but the seed page yielded {available} internal links")]
    ItineraryExhausted { required: i64, available: usize },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ScanError {
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        ScanError::Transport {
            url: url.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
