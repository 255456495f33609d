use tracing::{debug, warn};

use crate::{keys, KeyValueStore, StoreError};

pub const RECENT_QUERIES_CAP: usize = 5;

/// Most-recent-first list of unique past queries, persisted under one key.
pub struct RecentQueries {
    store: Box<dyn KeyValueStore>,
    entries: Vec<String>,
}

impl RecentQueries {
    /// Read the persisted list. Missing, unreadable or corrupt data yields an empty list.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let entries = match store.get(keys::RECENT_SEARCHES) {
            Ok(Some(raw)) => parse_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(target: "tumer_store", "recent searches unreadable, starting empty: {e}");
                Vec::new()
            }
        };
        debug!(
            target: "tumer_store",
            "loaded {} recent searches from {} store",
            entries.len(),
            store.name()
        );
        Self { store, entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Move `query` to the front, drop duplicates, cap the list and persist it.
    /// Empty queries are ignored. The in-memory list is updated even if the write fails.
    pub fn record(&mut self, query: &str) -> Result<(), StoreError> {
        if query.trim().is_empty() {
            return Ok(());
        }
        self.entries.retain(|s| s != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(RECENT_QUERIES_CAP);
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        // serializing a Vec<String> cannot fail
        let body = serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string());
        self.store.set(keys::RECENT_SEARCHES, &body)
    }
}

fn parse_entries(raw: &str) -> Vec<String> {
    let parsed: Vec<String> = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(target: "tumer_store", "recent searches corrupt, starting empty: {e}");
            return Vec::new();
        }
    };
    let mut out: Vec<String> = Vec::with_capacity(RECENT_QUERIES_CAP);
    for q in parsed {
        if q.trim().is_empty() || out.contains(&q) {
            continue;
        }
        out.push(q);
        if out.len() == RECENT_QUERIES_CAP {
            break;
        }
    }
    out
}
