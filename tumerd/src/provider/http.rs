use std::time::Duration;

use anyhow::Context;
use tracing::{debug, warn};
use tumer_api::{Collection, FetchError, FetchResult, OrderHint, SearchableRecord};
use url::Url;

use super::{decode_page, FetchFuture, RecordFetchProvider};

/// Hosted backend entity API: `GET {base}/entities/{Entity}?sort=..&limit=..`.
pub struct HttpProvider {
    client: reqwest::Client,
    base: Url,
    api_key: Option<String>,
    request_timeout: Duration,
    retries: u32,
    retry_base_backoff_ms: u64,
}

impl HttpProvider {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        request_timeout: Duration,
        retries: u32,
        retry_base_backoff_ms: u64,
    ) -> anyhow::Result<Self> {
        let mut base =
            Url::parse(base_url).with_context(|| format!("invalid backend url: {base_url}"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            base,
            api_key,
            request_timeout,
            retries,
            retry_base_backoff_ms,
        })
    }

    pub fn entity_url(&self, collection: Collection) -> Result<Url, url::ParseError> {
        self.base
            .join(&format!("entities/{}", collection.entity_name()))
    }

    async fn fetch_once(
        &self,
        collection: Collection,
        order: OrderHint,
        limit: usize,
    ) -> FetchResult<Vec<SearchableRecord>> {
        let url = self
            .entity_url(collection)
            .map_err(|e| FetchError::Transport {
                collection,
                message: e.to_string(),
            })?;
        let mut request = self
            .client
            .get(url)
            .query(&[("sort", order.as_sort_param()), ("limit", limit.to_string())]);
        if let Some(key) = &self.api_key {
            request = request.header("api_key", key);
        }

        let response = request.send().await.map_err(|e| self.transport_error(collection, e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                collection,
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(collection, e))?;
        decode_page(collection, &bytes)
    }

    fn transport_error(&self, collection: Collection, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                collection,
                elapsed: self.request_timeout,
            }
        } else {
            FetchError::Transport {
                collection,
                message: e.to_string(),
            }
        }
    }
}

impl RecordFetchProvider for HttpProvider {
    fn provider_name(&self) -> &'static str {
        "http"
    }

    fn fetch(&self, collection: Collection, order: OrderHint, limit: usize) -> FetchFuture<'_> {
        Box::pin(async move {
            let max = self.retries.saturating_add(1);
            let mut attempt = 1;
            loop {
                match self.fetch_once(collection, order, limit).await {
                    Ok(records) => {
                        debug!(
                            target: "tumerd::provider",
                            "{collection}: fetched {} records on attempt {attempt}",
                            records.len()
                        );
                        return Ok(records);
                    }
                    Err(e) if e.is_retryable() && attempt < max => {
                        let delay = compute_backoff_ms(self.retry_base_backoff_ms, attempt);
                        warn!(
                            target: "tumerd::provider",
                            "fetch attempt {}/{} failed: {} ; retrying in {} ms",
                            attempt,
                            max,
                            e,
                            delay
                        );
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        attempt += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        })
    }
}

fn compute_backoff_ms(base_ms: u64, attempt: u32) -> u64 {
    let mut factor = 1u64;
    for _ in 1..attempt {
        factor = factor.saturating_mul(2);
    }
    let capped = (base_ms.saturating_mul(factor)).min(30_000);
    let jitter = fastrand::u64(0..(base_ms / 2 + 1));
    capped.saturating_add(jitter)
}
