use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{PublisherRecord, PublisherStatus};

/// All known publishers keyed by homepage URL, in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrawlState {
    publishers: IndexMap<String, PublisherRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateSummary {
    pub ready: usize,
    pub parsed: usize,
    pub unable: usize,
    pub feeds: usize,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.publishers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }

    pub fn get(&self, homepage: &str) -> Option<&PublisherRecord> {
        self.publishers.get(homepage)
    }

    pub fn get_mut(&mut self, homepage: &str) -> Option<&mut PublisherRecord> {
        self.publishers.get_mut(homepage)
    }

    /// Insert under the record's homepage. An existing entry keeps its position.
    pub fn insert(&mut self, record: PublisherRecord) -> Option<PublisherRecord> {
        self.publishers.insert(record.url.clone(), record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PublisherRecord)> {
        self.publishers.iter()
    }

    pub fn records(&self) -> impl Iterator<Item = &PublisherRecord> {
        self.publishers.values()
    }

    /// Map each record's catalog detail URL to its homepage key.
    pub fn origin_index(&self) -> IndexMap<String, String> {
        self.publishers
            .iter()
            .map(|(homepage, record)| (record.from.clone(), homepage.clone()))
            .collect()
    }

    pub fn summary(&self) -> StateSummary {
        self.publishers
            .values()
            .fold(StateSummary::default(), |mut summary, record| {
                match record.status {
                    PublisherStatus::Ready => summary.ready += 1,
                    PublisherStatus::Parsed => summary.parsed += 1,
                    PublisherStatus::Unable => summary.unable += 1,
                }
                summary.feeds += record.rss.len();
                summary
            })
    }
}
