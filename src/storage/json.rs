use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::CrawlState;
use crate::errors::{ScoutError, ScoutResult};
use crate::storage::traits::StateStore;

/// Crawl state kept as one JSON document, rewritten in full on every save.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> ScoutResult<CrawlState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CrawlState::new()),
            Err(e) => {
                return Err(ScoutError::StateLoad(format!("{}: {}", self.path.display(), e)));
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| ScoutError::StateLoad(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, state: &CrawlState) -> ScoutResult<()> {
        let json = serde_json::to_string(state)?;
        fs::write(&self.path, json)
            .map_err(|e| ScoutError::Persistence(format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedLink, FetchSnapshot, PublisherRecord, PublisherStatus};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_state() -> CrawlState {
        let mut parsed = PublisherRecord::new(
            "Daily".to_string(),
            "http://daily.example".to_string(),
            "http://catalog.example/1".to_string(),
        )
        .with_extra(json!({"mediamap": {"area": "Busan", "call": "051"}}));
        parsed.status = PublisherStatus::Parsed;
        parsed.rss = vec![
            FeedLink {
                category: Some("Economy".to_string()),
                url: "http://daily.example/rss/economy.xml".to_string(),
            },
            FeedLink {
                category: None,
                url: "http://daily.example/rss/all.xml".to_string(),
            },
        ];
        parsed
            .site
            .insert("/".to_string(), FetchSnapshot::from_body(None));

        let ready = PublisherRecord::new(
            "Weekly".to_string(),
            "https://weekly.example".to_string(),
            "http://catalog.example/2".to_string(),
        );

        let mut state = CrawlState::new();
        state.insert(parsed);
        state.insert(ready);
        state
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(dir.path().join("absent.json"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_records() {
        let dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(dir.path().join("state.json"));
        let state = sample_state();

        store.save(&state).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, state);
        let keys: Vec<&String> = loaded.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["http://daily.example", "https://weekly.example"]);
    }

    #[test]
    fn test_corrupt_file_is_state_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonStateStore::new(&path).load();
        assert!(matches!(result, Err(ScoutError::StateLoad(_))));
    }

    #[test]
    fn test_unwritable_path_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(dir.path().join("missing-dir").join("state.json"));

        let result = store.save(&sample_state());
        assert!(matches!(result, Err(ScoutError::Persistence(_))));
    }
}
