use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FeedLink;

/// Paths fetched for every publisher homepage.
pub const HOMEPAGE_PATH: &str = "/";
pub const ROBOTS_PATH: &str = "/robots.txt";
pub const SITEMAP_PATH: &str = "/sitemap.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublisherStatus {
    Ready,
    Parsed,
    Unable,
}

impl PublisherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublisherStatus::Ready => "ready",
            PublisherStatus::Parsed => "parsed",
            PublisherStatus::Unable => "unable",
        }
    }

    /// Terminal publishers are never crawled again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PublisherStatus::Ready)
    }
}

impl std::fmt::Display for PublisherStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of fetching one path of a publisher site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchSnapshot {
    pub ok: bool,
    pub text: String,
    pub parsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl FetchSnapshot {
    pub fn from_body(body: Option<String>) -> Self {
        match body {
            Some(text) => Self {
                ok: true,
                text,
                parsed: false,
                fetched_at: Some(Utc::now()),
            },
            None => Self {
                ok: false,
                text: String::new(),
                parsed: true,
                fetched_at: Some(Utc::now()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherRecord {
    pub name: String,
    /// Homepage, `scheme://host`
    pub url: String,
    pub status: PublisherStatus,
    #[serde(default)]
    pub rss: Vec<FeedLink>,
    #[serde(default)]
    pub extra: serde_json::Value,
    /// Catalog detail page this record was scraped from
    pub from: String,
    #[serde(default)]
    pub site: IndexMap<String, FetchSnapshot>,
}

impl PublisherRecord {
    pub fn new(name: String, url: String, from: String) -> Self {
        Self {
            name,
            url,
            status: PublisherStatus::Ready,
            rss: Vec::new(),
            extra: serde_json::Value::Object(Default::default()),
            from,
            site: IndexMap::new(),
        }
    }

    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = extra;
        self
    }
}
