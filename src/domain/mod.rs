pub mod feed;
pub mod publisher;
pub mod state;

pub use feed::{FeedCandidate, FeedLink, Validation};
pub use publisher::{FetchSnapshot, PublisherRecord, PublisherStatus};
pub use state::{CrawlState, StateSummary};
