//! Feed discovery for a single publisher homepage.
//!
//! Two independent scans (RSS `<link>` tags, then the page body) produce
//! candidate URLs. Each candidate is fetched and classified; feed-directory
//! pages are expanded into their listed feeds. The results of both scans are
//! merged so that a direct feed classification always wins over an entry
//! reached through a directory page.

pub mod directory;
pub mod extract;
pub mod normalize;
pub mod validate;

use indexmap::IndexMap;

use crate::domain::{FeedCandidate, FeedLink, Validation};
use crate::fetch::Fetcher;

pub use directory::parse_directory_page;
pub use extract::{body_candidates, link_tag_candidates};
pub use normalize::normalize_url;
pub use validate::{check_feed, validate_candidate, FeedCheck};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Keep a directory page's own URL when no feed rows could be read from it.
    pub keep_unparsed_directories: bool,
}

/// Discover every feed reachable from a homepage body.
pub fn find_rss_in_all<F: Fetcher + ?Sized>(
    fetcher: &F,
    base_url: &str,
    site_text: &str,
    options: DiscoveryOptions,
) -> Vec<FeedLink> {
    let from_links = expand_candidates(fetcher, link_tag_candidates(base_url, site_text), options);
    let from_body = expand_candidates(fetcher, body_candidates(base_url, site_text), options);

    tracing::debug!(
        base = %base_url,
        link_tag = from_links.len(),
        body = from_body.len(),
        "discovery scans finished"
    );

    merge_candidates(from_links.into_iter().chain(from_body))
        .into_values()
        .map(FeedCandidate::into_link)
        .collect()
}

/// Validate candidate URLs and expand directory pages into their listed feeds.
pub fn expand_candidates<F, I>(fetcher: &F, urls: I, options: DiscoveryOptions) -> Vec<FeedCandidate>
where
    F: Fetcher + ?Sized,
    I: IntoIterator<Item = String>,
{
    let mut found = Vec::new();

    for url in urls {
        match validate_candidate(fetcher, &url) {
            Some(Validation::Feed { url }) => found.push(FeedCandidate::Direct { url }),
            Some(Validation::DirectoryPage { url, text }) => {
                let listed = parse_directory_page(&text);
                if !listed.is_empty() {
                    tracing::debug!(url = %url, feeds = listed.len(), "expanded feed directory");
                    found.extend(listed);
                } else if options.keep_unparsed_directories {
                    found.push(FeedCandidate::UnparsedDirectory { url });
                } else {
                    tracing::debug!(url = %url, "dropping HTML page without feed rows");
                }
            }
            None => {}
        }
    }

    found
}

/// Merge candidates keyed by URL in first-seen order.
///
/// Direct feeds replace any earlier entry for the same URL; every other kind
/// is only inserted when the URL is new.
pub fn merge_candidates<I>(candidates: I) -> IndexMap<String, FeedCandidate>
where
    I: IntoIterator<Item = FeedCandidate>,
{
    let mut merged = IndexMap::new();

    for candidate in candidates {
        if candidate.is_direct() {
            merged.insert(candidate.url().to_string(), candidate);
        } else {
            merged
                .entry(candidate.url().to_string())
                .or_insert(candidate);
        }
    }

    merged
}
