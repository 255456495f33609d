use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tumer_api::{Collection, FetchError, OrderHint};

use super::{apply_order, decode_page, FetchFuture, RecordFetchProvider};

/// Serves collections from `<dir>/<EntityName>.json` files.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    dir: PathBuf,
}

impl FixtureProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.entity_name()))
    }
}

impl RecordFetchProvider for FixtureProvider {
    fn provider_name(&self) -> &'static str {
        "fixture"
    }

    fn fetch(&self, collection: Collection, order: OrderHint, limit: usize) -> FetchFuture<'_> {
        Box::pin(async move {
            let path = self.path_for(collection);
            let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
                ErrorKind::NotFound => FetchError::Unavailable {
                    collection,
                    message: format!("no fixture at {}", path.display()),
                },
                _ => FetchError::Transport {
                    collection,
                    message: format!("{}: {e}", path.display()),
                },
            })?;
            let mut records = decode_page(collection, &bytes)?;
            apply_order(&mut records, order);
            records.truncate(limit);
            Ok(records)
        })
    }
}
