use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::Config;
use crate::errors::{ScoutError, ScoutResult};
use crate::fetch::traits::Fetcher;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0";

/// Blocking HTTP fetcher that remembers every response for its own lifetime.
///
/// Failures are cached too, so an unreachable URL costs one request per process.
pub struct CachingHttpFetcher {
    client: Client,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl CachingHttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> ScoutResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            // Many publisher sites serve expired or self-signed certificates
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn from_config(config: &Config) -> ScoutResult<Self> {
        Self::new(&config.user_agent, config.request_timeout)
    }

    fn request(&self, url: &str) -> ScoutResult<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Transport {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response.text()?;
        if body.is_empty() {
            return Err(ScoutError::Transport {
                url: url.to_string(),
                reason: "empty body".to_string(),
            });
        }

        Ok(body)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl Fetcher for CachingHttpFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(cached) = cache.get(url) {
                return cached.clone();
            }
        }

        let body = match self.request(url) {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "fetch failed");
                None
            }
        };

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(url.to_string(), body.clone());
        }

        body
    }
}
