use crate::domain::{CrawlState, PublisherRecord};
use crate::errors::{ScoutError, ScoutResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::StateStore;

/// Crawl state kept as one row per publisher, rewritten in a single transaction.
pub struct SqliteStateStore {
    storage: SqliteStorage,
}

impl SqliteStateStore {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn write_all(&self, state: &CrawlState) -> ScoutResult<()> {
        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM publishers", [])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO publishers (homepage, position, record) VALUES (?1, ?2, ?3)")?;
            for (position, (homepage, record)) in state.iter().enumerate() {
                let json = serde_json::to_string(record)?;
                stmt.execute((homepage, position as i64, json))?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

impl StateStore for SqliteStateStore {
    fn load(&self) -> ScoutResult<CrawlState> {
        let conn = self.storage.connection()?;
        let mut stmt = conn
            .prepare("SELECT record FROM publishers ORDER BY position")
            .map_err(|e| ScoutError::StateLoad(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ScoutError::StateLoad(e.to_string()))?;

        let mut state = CrawlState::new();
        for row in rows {
            let json = row.map_err(|e| ScoutError::StateLoad(e.to_string()))?;
            let record: PublisherRecord =
                serde_json::from_str(&json).map_err(|e| ScoutError::StateLoad(e.to_string()))?;
            state.insert(record);
        }

        Ok(state)
    }

    fn save(&self, state: &CrawlState) -> ScoutResult<()> {
        self.write_all(state)
            .map_err(|e| ScoutError::Persistence(e.to_string()))
    }
}
