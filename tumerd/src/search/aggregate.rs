use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use tumer_api::{Collection, FetchError, ResultSet};
use tumer_query::NormalizedQuery;

use super::filter_page;
use crate::provider::RecordFetchProvider;

/// Fans a committed query out to every collection and joins the filtered pages.
#[derive(Clone)]
pub struct Aggregator {
    provider: Arc<dyn RecordFetchProvider>,
    fetch_timeout: Duration,
}

impl Aggregator {
    pub fn new(provider: Arc<dyn RecordFetchProvider>, fetch_timeout: Duration) -> Self {
        Self {
            provider,
            fetch_timeout,
        }
    }

    pub fn provider(&self) -> &Arc<dyn RecordFetchProvider> {
        &self.provider
    }

    /// All six fetches run concurrently, each bounded by the fetch timeout.
    /// A failed, timed out or panicked fetch leaves that collection empty and marked failed;
    /// the other collections are unaffected.
    pub async fn aggregate(&self, query: &NormalizedQuery) -> ResultSet {
        let start = Instant::now();
        let mut handles = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            let provider = self.provider.clone();
            let timeout = self.fetch_timeout;
            let (order, limit) = collection.search_plan();
            handles.push((
                collection,
                tokio::spawn(async move {
                    match tokio::time::timeout(timeout, provider.fetch(collection, order, limit))
                        .await
                    {
                        Ok(res) => res,
                        Err(_) => Err(FetchError::Timeout {
                            collection,
                            elapsed: timeout,
                        }),
                    }
                }),
            ));
        }

        let mut results = ResultSet::new(query.raw.clone());
        for (collection, handle) in handles {
            match handle.await {
                Ok(Ok(page)) => {
                    let fetched = page.len();
                    let matched = filter_page(page, &query.needle);
                    debug!(
                        target: "tumerd::search",
                        "{collection}: {} of {} records match",
                        matched.len(),
                        fetched
                    );
                    results.insert(collection, matched);
                }
                Ok(Err(e)) => {
                    warn!(target: "tumerd::search", "fetch failed, treating as empty: {e}");
                    results.mark_failed(collection);
                }
                Err(e) => {
                    warn!(target: "tumerd::search", "{collection}: fetch task aborted: {e}");
                    results.mark_failed(collection);
                }
            }
        }
        debug!(
            target: "tumerd::search",
            "query={:?} matched={} failed={} in {:?}",
            query.raw,
            results.total(),
            results.failed.len(),
            start.elapsed()
        );
        results
    }
}
