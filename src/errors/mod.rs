use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Network errors
    #[error("Fetch failed for {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Parsing errors
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    #[error("Malformed HTML: {0}")]
    MalformedHtml(String),

    #[error("Unexpected catalog layout: {0}")]
    Catalog(String),

    // Storage errors
    #[error("Failed to persist crawl state: {0}")]
    Persistence(String),

    #[error("Failed to load crawl state: {0}")]
    StateLoad(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Export errors
    #[error("OPML export failed: {0}")]
    OpmlExport(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScoutResult<T> = Result<T, ScoutError>;
