use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tumer_api::{Collection, FetchError, OrderHint, SearchableRecord};

use super::{apply_order, FetchFuture, RecordFetchProvider};

/// In-process collections with optional latency and failure injection.
#[derive(Default)]
pub struct MemoryProvider {
    collections: HashMap<Collection, Vec<SearchableRecord>>,
    latency: HashMap<Collection, Duration>,
    failing: HashSet<Collection>,
    fetches: AtomicUsize,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, records: impl IntoIterator<Item = SearchableRecord>) -> Self {
        for r in records {
            self.collections.entry(r.collection()).or_default().push(r);
        }
        self
    }

    pub fn with_latency(mut self, collection: Collection, latency: Duration) -> Self {
        self.latency.insert(collection, latency);
        self
    }

    pub fn failing(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    /// Number of fetch calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl RecordFetchProvider for MemoryProvider {
    fn provider_name(&self) -> &'static str {
        "memory"
    }

    fn fetch(&self, collection: Collection, order: OrderHint, limit: usize) -> FetchFuture<'_> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::Relaxed);
            if let Some(delay) = self.latency.get(&collection) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing.contains(&collection) {
                return Err(FetchError::Unavailable {
                    collection,
                    message: "injected failure".to_string(),
                });
            }
            let mut records = self
                .collections
                .get(&collection)
                .cloned()
                .unwrap_or_default();
            apply_order(&mut records, order);
            records.truncate(limit);
            Ok(records)
        })
    }
}
