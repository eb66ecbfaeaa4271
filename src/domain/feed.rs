use serde::{Deserialize, Serialize};

/// A discovered feed as persisted in a publisher record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedLink {
    pub category: Option<String>,
    pub url: String,
}

/// Outcome of fetching a candidate URL that survived validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The URL serves a syndication feed.
    Feed { url: String },
    /// The URL serves HTML that may list feeds; the body is kept for extraction.
    DirectoryPage { url: String, text: String },
}

/// A validated feed together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCandidate {
    /// The candidate URL itself parsed as a feed.
    Direct { url: String },
    /// A row of a feed-directory page.
    Listed { category: String, url: String },
    /// A directory page from which no rows could be extracted.
    UnparsedDirectory { url: String },
}

impl FeedCandidate {
    pub fn url(&self) -> &str {
        match self {
            FeedCandidate::Direct { url }
            | FeedCandidate::Listed { url, .. }
            | FeedCandidate::UnparsedDirectory { url } => url,
        }
    }

    /// Direct classifications take priority over anything reached via a directory page.
    pub fn is_direct(&self) -> bool {
        matches!(self, FeedCandidate::Direct { .. })
    }

    pub fn into_link(self) -> FeedLink {
        match self {
            FeedCandidate::Direct { url } | FeedCandidate::UnparsedDirectory { url } => FeedLink {
                category: None,
                url,
            },
            FeedCandidate::Listed { category, url } => FeedLink {
                category: Some(category),
                url,
            },
        }
    }
}
