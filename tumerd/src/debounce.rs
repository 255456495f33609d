use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// A timer is running; the value commits when it expires.
    Scheduled,
    /// Input is empty: nothing pending, the caller clears immediately.
    Cleared,
}

#[derive(Debug)]
struct Pending {
    value: String,
    deadline: Instant,
}

/// Last-write-wins debounce with at most one pending timer.
#[derive(Debug)]
pub struct Debouncer {
    settle: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            pending: None,
        }
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Restart the timer with a new raw value. Blank input cancels instead.
    pub fn push(&mut self, raw: &str) -> DebounceOutcome {
        if raw.trim().is_empty() {
            self.pending = None;
            return DebounceOutcome::Cleared;
        }
        self.pending = Some(Pending {
            value: raw.to_string(),
            deadline: Instant::now() + self.settle,
        });
        DebounceOutcome::Scheduled
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the committed value once the quiet period passes.
    /// Never resolves while nothing is pending. Dropping the future before it
    /// resolves keeps the pending value, so this is safe inside `select!`.
    pub async fn fired(&mut self) -> String {
        let deadline = match &self.pending {
            Some(p) => p.deadline,
            None => return std::future::pending().await,
        };
        tokio::time::sleep_until(deadline).await;
        self.pending.take().map(|p| p.value).unwrap_or_default()
    }
}
