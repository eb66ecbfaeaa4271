use std::collections::HashMap;
use std::sync::Mutex;

use crate::fetch::traits::Fetcher;

/// In-memory fetcher serving canned bodies and recording every requested URL.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned()
    }
}
