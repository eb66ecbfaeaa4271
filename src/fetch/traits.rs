/// Source of page bodies for the discovery pipeline.
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher: Send + Sync {
    /// Body of `url`, or `None` on any transport or HTTP status failure.
    fn fetch(&self, url: &str) -> Option<String>;
}
