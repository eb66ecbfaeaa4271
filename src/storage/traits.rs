use crate::domain::CrawlState;
use crate::errors::ScoutResult;

/// Durable home of the crawl state between runs.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore: Send + Sync {
    /// Load the saved state. A store that was never written loads as empty.
    fn load(&self) -> ScoutResult<CrawlState>;

    /// Replace the saved state with `state`.
    fn save(&self, state: &CrawlState) -> ScoutResult<()>;
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn load(&self) -> ScoutResult<CrawlState> {
        (**self).load()
    }

    fn save(&self, state: &CrawlState) -> ScoutResult<()> {
        (**self).save(state)
    }
}
