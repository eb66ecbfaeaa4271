pub mod json;
pub mod sqlite;
pub mod traits;

use std::path::Path;

use crate::errors::ScoutResult;

pub use json::JsonStateStore;
pub use sqlite::{SqliteStateStore, SqliteStorage};
pub use traits::StateStore;

#[cfg(test)]
pub use traits::MockStateStore;

const SQLITE_EXTENSIONS: &[&str] = &["db", "sqlite", "sqlite3"];

/// Pick a store by file extension: SQLite for database files, JSON otherwise.
pub fn open_state_store<P: AsRef<Path>>(path: P) -> ScoutResult<Box<dyn StateStore>> {
    let path = path.as_ref();
    let is_sqlite = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SQLITE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if is_sqlite {
        Ok(Box::new(SqliteStateStore::new(SqliteStorage::new(path)?)))
    } else {
        Ok(Box::new(JsonStateStore::new(path)))
    }
}
