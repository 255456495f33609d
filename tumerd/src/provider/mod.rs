use std::cmp::Ordering;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Context;
use tracing::warn;
use tumer_api::{Collection, FetchError, FetchResult, OrderHint, SearchableRecord};

use crate::config::{ProviderKind, SearchConfig};

pub mod fixture;
pub mod http;
pub mod memory;

pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = FetchResult<Vec<SearchableRecord>>> + Send + 'a>>;

/// Access to the hosted record collections.
/// `order` is honored best-effort; `limit` bounds the page size.
pub trait RecordFetchProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn fetch(&self, collection: Collection, order: OrderHint, limit: usize) -> FetchFuture<'_>;
}

/// Select a provider implementation from configuration.
pub fn make_provider(cfg: &SearchConfig) -> anyhow::Result<Arc<dyn RecordFetchProvider>> {
    match cfg.provider {
        ProviderKind::Fixture => Ok(Arc::new(fixture::FixtureProvider::new(&cfg.fixtures_dir))),
        ProviderKind::Memory => Ok(Arc::new(memory::MemoryProvider::new())),
        ProviderKind::Http => {
            let base = cfg
                .backend_url
                .as_deref()
                .context("TUMER_BACKEND_URL must be set for the http provider")?;
            let provider = http::HttpProvider::new(
                base,
                cfg.api_key.clone(),
                cfg.request_timeout(),
                cfg.fetch_retries,
                cfg.retry_base_backoff_ms,
            )?;
            Ok(Arc::new(provider))
        }
    }
}

/// Stable sort by the hinted field; records lacking the field go last.
pub fn apply_order(records: &mut [SearchableRecord], order: OrderHint) {
    records.sort_by(|a, b| match (a.field(order.field), b.field(order.field)) {
        (Some(x), Some(y)) => {
            if order.descending {
                y.cmp(x)
            } else {
                x.cmp(y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Decode a JSON array of backend rows. Rows that do not fit the collection's shape are skipped.
pub fn decode_page(collection: Collection, bytes: &[u8]) -> FetchResult<Vec<SearchableRecord>> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| FetchError::Decode {
            collection,
            message: e.to_string(),
        })?;
    let serde_json::Value::Array(rows) = value else {
        return Err(FetchError::Decode {
            collection,
            message: "expected a JSON array".to_string(),
        });
    };
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        match SearchableRecord::from_json(collection, row) {
            Ok(r) => out.push(r),
            Err(e) => {
                warn!(target: "tumerd::provider", "{collection}: skipping row {i}: {e}");
            }
        }
    }
    Ok(out)
}
