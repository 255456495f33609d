//! Search overlay state machine.
//!
//! `Idle` (no query) -> `Debouncing` (timer running) -> `Searching` (fetches in flight)
//! -> `Results`, back to `Idle` when the query is cleared, or to `Debouncing` on the next
//! keystroke from any state. Each committed query carries a sequence number and only the
//! latest one may update visible state.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tumer_api::{category_by_key, ResultSet};
use tumer_query::normalize_query;
use tumer_store::RecentQueries;

use crate::debounce::{DebounceOutcome, Debouncer};
use crate::search::Aggregator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Debouncing,
    Searching,
    Results,
}

/// Everything the shell renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub open: bool,
    pub phase: SearchPhase,
    pub raw_query: String,
    pub committed_query: String,
    pub results: ResultSet,
    /// Sequence number of the search that produced `results`; 0 before the first one lands.
    pub results_seq: u64,
    pub recent: Vec<String>,
    pub is_searching: bool,
}

impl SearchSnapshot {
    fn initial(recent: Vec<String>) -> Self {
        Self {
            open: false,
            phase: SearchPhase::Idle,
            raw_query: String::new(),
            committed_query: String::new(),
            results: ResultSet::empty(),
            results_seq: 0,
            recent,
            is_searching: false,
        }
    }
}

/// Route the shell should follow after a category is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub key: &'static str,
    pub page: &'static str,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown search category: {0:?}")]
    UnknownCategory(String),

    #[error("search session has shut down")]
    Closed,
}

#[derive(Debug)]
enum Command {
    Open,
    Close,
    SetRawQuery(String),
    SelectRecent(String),
    Shutdown,
}

struct Completion {
    seq: u64,
    results: ResultSet,
}

/// Shell-facing handle to a running session.
#[derive(Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<SearchSnapshot>,
}

impl SearchHandle {
    pub fn open(&self) -> Result<(), SessionError> {
        self.send(Command::Open)
    }

    pub fn close(&self) -> Result<(), SessionError> {
        self.send(Command::Close)
    }

    /// Feed one keystroke's worth of input into the debouncer.
    pub fn set_raw_query(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.send(Command::SetRawQuery(text.into()))
    }

    /// Re-issue a past query immediately, bypassing the debounce window.
    pub fn select_recent_query(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.send(Command::SelectRecent(text.into()))
    }

    /// Resolve a category's listing route and close the overlay.
    pub fn navigate_to_category(&self, key: &str) -> Result<Navigation, SessionError> {
        let cat = category_by_key(key).ok_or_else(|| SessionError::UnknownCategory(key.to_string()))?;
        self.send(Command::Close)?;
        Ok(Navigation {
            key: cat.key(),
            page: cat.page,
            url: cat.page_url(),
        })
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.clone()
    }

    /// Wait until a snapshot satisfies `pred`, returning it.
    pub async fn wait_for(
        &self,
        mut pred: impl FnMut(&SearchSnapshot) -> bool,
    ) -> Result<SearchSnapshot, SessionError> {
        let mut rx = self.state.clone();
        let snap = rx
            .wait_for(|s| pred(s))
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(snap.clone())
    }

    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.send(Command::Shutdown)
    }

    fn send(&self, cmd: Command) -> Result<(), SessionError> {
        self.commands.send(cmd).map_err(|_| SessionError::Closed)
    }
}

pub struct SearchSession {
    aggregator: Aggregator,
    debouncer: Debouncer,
    recent: RecentQueries,
    snapshot: SearchSnapshot,
    state: watch::Sender<SearchSnapshot>,
    completions: mpsc::UnboundedSender<Completion>,
    latest_seq: u64,
}

/// Start a session actor on the current runtime.
pub fn spawn_session(
    aggregator: Aggregator,
    debouncer: Debouncer,
    recent: RecentQueries,
) -> (SearchHandle, JoinHandle<()>) {
    let snapshot = SearchSnapshot::initial(recent.entries().to_vec());
    let (state_tx, state_rx) = watch::channel(snapshot.clone());
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (done_tx, done_rx) = mpsc::unbounded_channel();
    let session = SearchSession {
        aggregator,
        debouncer,
        recent,
        snapshot,
        state: state_tx,
        completions: done_tx,
        latest_seq: 0,
    };
    let task = tokio::spawn(session.run(cmd_rx, done_rx));
    (
        SearchHandle {
            commands: cmd_tx,
            state: state_rx,
        },
        task,
    )
}

impl SearchSession {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                committed = self.debouncer.fired() => self.commit(committed),
                Some(done) = completions.recv() => self.complete(done),
            }
        }
        debug!(target: "tumerd::session", "search session stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Open => {
                self.snapshot.open = true;
                self.publish();
            }
            Command::Close => {
                self.snapshot.open = false;
                self.publish();
            }
            Command::SetRawQuery(text) => {
                self.snapshot.raw_query = text;
                match self.debouncer.push(&self.snapshot.raw_query) {
                    DebounceOutcome::Scheduled => {
                        self.snapshot.phase = SearchPhase::Debouncing;
                        self.publish();
                    }
                    DebounceOutcome::Cleared => self.clear(),
                }
            }
            Command::SelectRecent(text) => {
                self.debouncer.cancel();
                self.snapshot.raw_query = text.clone();
                self.commit(text);
            }
            Command::Shutdown => {}
        }
    }

    fn clear(&mut self) {
        // invalidate anything still in flight
        self.latest_seq += 1;
        self.snapshot.committed_query.clear();
        self.snapshot.results = ResultSet::empty();
        self.snapshot.phase = SearchPhase::Idle;
        self.snapshot.is_searching = false;
        self.publish();
    }

    fn commit(&mut self, raw: String) {
        let Some(query) = normalize_query(&raw) else {
            self.clear();
            return;
        };
        self.latest_seq += 1;
        let seq = self.latest_seq;
        info!(target: "tumerd::session", "search #{seq} committed: {:?}", query.raw);

        self.snapshot.committed_query = raw;
        self.snapshot.phase = SearchPhase::Searching;
        self.snapshot.is_searching = true;
        self.publish();

        let aggregator = self.aggregator.clone();
        let done = self.completions.clone();
        tokio::spawn(async move {
            let results = aggregator.aggregate(&query).await;
            let _ = done.send(Completion { seq, results });
        });
    }

    fn complete(&mut self, done: Completion) {
        if done.seq != self.latest_seq {
            debug!(
                target: "tumerd::session",
                "discarding stale results for search #{} (latest #{})",
                done.seq,
                self.latest_seq
            );
            return;
        }
        if done.results.all_failed() {
            warn!(
                target: "tumerd::session",
                "search #{} reached no collection, not saving {:?} to recent searches",
                done.seq,
                done.results.query
            );
        } else if let Err(e) = self.recent.record(&done.results.query) {
            warn!(target: "tumerd::session", "failed to persist recent searches: {e}");
        }
        self.snapshot.recent = self.recent.entries().to_vec();
        self.snapshot.results = done.results;
        self.snapshot.results_seq = done.seq;
        self.snapshot.is_searching = false;
        if !self.debouncer.is_pending() {
            self.snapshot.phase = SearchPhase::Results;
        }
        self.publish();
    }

    fn publish(&self) {
        self.state.send_replace(self.snapshot.clone());
    }
}
