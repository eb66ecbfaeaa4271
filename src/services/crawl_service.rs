use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::discovery::{find_rss_in_all, DiscoveryOptions};
use crate::domain::publisher::{HOMEPAGE_PATH, ROBOTS_PATH, SITEMAP_PATH};
use crate::domain::{CrawlState, FetchSnapshot, PublisherRecord, PublisherStatus};
use crate::fetch::Fetcher;
use crate::storage::StateStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlSettings {
    /// Rate limit after crawling a publisher that was new to the state.
    pub delay: Duration,
    /// Pause between the homepage fetch and the robots.txt fetch.
    pub pause: Duration,
    pub discovery: DiscoveryOptions,
}

/// Result of one unit of crawl work.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Homepage of the publisher crawled in this step, if any was left.
    pub processed: Option<String>,
    pub state: CrawlState,
}

pub struct CrawlService<F: Fetcher + ?Sized, C: Catalog, S: StateStore> {
    fetcher: Arc<F>,
    catalog: C,
    store: S,
    settings: CrawlSettings,
}

impl<F: Fetcher + ?Sized, C: Catalog, S: StateStore> CrawlService<F, C, S> {
    pub fn new(fetcher: Arc<F>, catalog: C, store: S, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            catalog,
            store,
            settings,
        }
    }

    /// Load the saved state, crawl at most one unfinished publisher, and return the state.
    pub fn step(&self) -> StepOutcome {
        let mut state = self.load_state();
        let processed = self.advance(&mut state);
        StepOutcome { processed, state }
    }

    /// Crawl until nothing is left or `max_steps` publishers were processed.
    pub fn run(&self, max_steps: Option<usize>) -> (usize, CrawlState) {
        let mut state = self.load_state();
        let mut steps = 0;

        while max_steps.map_or(true, |max| steps < max) {
            if self.advance(&mut state).is_none() {
                break;
            }
            steps += 1;
        }

        (steps, state)
    }

    /// Crawl the first non-terminal publisher in catalog order and persist the state.
    pub fn advance(&self, state: &mut CrawlState) -> Option<String> {
        let origins = state.origin_index();

        for detail_url in self.catalog.list_detail_urls() {
            let (homepage, preloaded) = match origins.get(&detail_url) {
                Some(homepage) => (homepage.clone(), true),
                None => match self.catalog.fetch_publisher(&detail_url) {
                    Ok(record) => {
                        let homepage = record.url.clone();
                        state.insert(record);
                        (homepage, false)
                    }
                    Err(e) => {
                        tracing::warn!(detail = %detail_url, error = %e, "skipping catalog entry");
                        continue;
                    }
                },
            };

            let Some(record) = state.get_mut(&homepage) else {
                continue;
            };
            if record.status.is_terminal() {
                continue;
            }

            self.crawl_publisher(record);
            tracing::info!(
                publisher = %record.name,
                homepage = %homepage,
                status = %record.status,
                feeds = record.rss.len(),
                "publisher crawled"
            );

            self.persist(state);

            if !preloaded {
                pause(self.settings.delay);
            }
            return Some(homepage);
        }

        None
    }

    /// Fetch the site snapshots of a `ready` publisher and move it to a terminal status.
    pub fn crawl_publisher(&self, record: &mut PublisherRecord) {
        let base = record.url.clone();

        let homepage = self.snapshot(&base, HOMEPAGE_PATH);
        record.site.insert(HOMEPAGE_PATH.to_string(), homepage);
        pause(self.settings.pause);
        record
            .site
            .insert(ROBOTS_PATH.to_string(), self.snapshot(&base, ROBOTS_PATH));
        record
            .site
            .insert(SITEMAP_PATH.to_string(), self.snapshot(&base, SITEMAP_PATH));

        let reachable = record.site.get(HOMEPAGE_PATH).is_some_and(|s| s.ok);
        if !reachable {
            for snapshot in record.site.values_mut() {
                snapshot.text.clear();
            }
            record.status = PublisherStatus::Unable;
            return;
        }

        let text = match record.site.get_mut(HOMEPAGE_PATH) {
            Some(homepage) => {
                homepage.parsed = true;
                std::mem::take(&mut homepage.text)
            }
            None => String::new(),
        };

        let feeds = find_rss_in_all(&*self.fetcher, &base, &text, self.settings.discovery);
        record.rss.extend(feeds);
        record.status = PublisherStatus::Parsed;
    }

    fn snapshot(&self, base: &str, path: &str) -> FetchSnapshot {
        FetchSnapshot::from_body(self.fetcher.fetch(&format!("{}{}", base, path)))
    }

    fn load_state(&self) -> CrawlState {
        match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "starting from an empty crawl state");
                CrawlState::new()
            }
        }
    }

    fn persist(&self, state: &CrawlState) {
        if let Err(e) = self.store.save(state) {
            tracing::warn!(error = %e, "continuing with unsaved crawl state");
        }
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}
