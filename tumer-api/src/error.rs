use std::time::Duration;

use thiserror::Error;

use crate::collection::Collection;

/// Failure of a single collection fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{collection}: transport error: {message}")]
    Transport { collection: Collection, message: String },

    #[error("{collection}: backend returned status {status}: {body}")]
    Status {
        collection: Collection,
        status: u16,
        body: String,
    },

    #[error("{collection}: undecodable payload: {message}")]
    Decode { collection: Collection, message: String },

    #[error("{collection}: fetch timed out after {elapsed:?}")]
    Timeout { collection: Collection, elapsed: Duration },

    #[error("{collection}: {message}")]
    Unavailable { collection: Collection, message: String },
}

impl FetchError {
    pub fn collection(&self) -> Collection {
        match self {
            FetchError::Transport { collection, .. }
            | FetchError::Status { collection, .. }
            | FetchError::Decode { collection, .. }
            | FetchError::Timeout { collection, .. }
            | FetchError::Unavailable { collection, .. } => *collection,
        }
    }

    /// Transport failures, timeouts and 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport { .. } | FetchError::Timeout { .. } => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::Decode { .. } | FetchError::Unavailable { .. } => false,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
