pub mod http;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use http::{CachingHttpFetcher, DEFAULT_USER_AGENT};
pub use traits::Fetcher;

#[cfg(test)]
pub use traits::MockFetcher;
