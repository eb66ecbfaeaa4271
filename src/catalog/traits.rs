use crate::domain::PublisherRecord;
use crate::errors::ScoutResult;

/// Upstream listing of publishers to crawl.
#[cfg_attr(test, mockall::automock)]
pub trait Catalog: Send + Sync {
    /// Detail page URLs in catalog order. Empty when the listing is unreachable.
    fn list_detail_urls(&self) -> Vec<String>;

    /// Scrape a detail page into a fresh `ready` record.
    fn fetch_publisher(&self, detail_url: &str) -> ScoutResult<PublisherRecord>;
}
