use tumerd::config::SearchConfig;
use tumerd::debounce::Debouncer;
use tumerd::provider::make_provider;
use tumerd::search::Aggregator;
use tumerd::session::{spawn_session, SearchHandle, SearchPhase, SearchSnapshot, SessionError};

use anyhow::{Context, Result};
use dotenv::dotenv;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tumer_api::response::ResultPreview;
use tumer_api::SEARCH_CATEGORIES;
use tumer_store::{open_store, RecentQueries, StoreConfig};

// Single-threaded: fetches overlap on I/O, never run in parallel.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cfg = SearchConfig::from_env();
    let provider = make_provider(&cfg).context("record provider init failed")?;
    info!(
        "provider={} debounce={:?} fetch_timeout={:?} request_timeout={:?}",
        provider.provider_name(),
        cfg.debounce(),
        cfg.fetch_timeout(),
        cfg.request_timeout()
    );

    let store_cfg = StoreConfig::from_env();
    let store = open_store(&store_cfg)
        .with_context(|| format!("cannot open store at {}", store_cfg.dir.display()))?;
    let recent = RecentQueries::load(store);

    let (handle, session) = spawn_session(
        Aggregator::new(provider, cfg.fetch_timeout()),
        Debouncer::new(cfg.debounce()),
        recent,
    );
    handle.open()?;
    let printer = tokio::spawn(print_updates(handle.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match handle_line(&handle, &line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => warn!("{e}"),
        }
    }

    // stdin closed or :quit
    let _ = handle.shutdown();
    let _ = session.await;
    printer.abort();
    Ok(())
}

/// Returns `Ok(false)` when the user asked to quit.
fn handle_line(handle: &SearchHandle, line: &str) -> Result<bool, SessionError> {
    let Some(cmd) = line.strip_prefix(':') else {
        handle.set_raw_query(line)?;
        return Ok(true);
    };
    let (name, arg) = match cmd.split_once(' ') {
        Some((n, a)) => (n, a.trim()),
        None => (cmd, ""),
    };
    match name {
        "quit" | "q" => return Ok(false),
        "open" => handle.open()?,
        "close" => handle.close()?,
        "recent" => {
            let recent = handle.snapshot().recent;
            match arg.parse::<usize>().ok().and_then(|n| recent.get(n.wrapping_sub(1))) {
                Some(q) => handle.select_recent_query(q.clone())?,
                None => println!("{}", json!({ "recent": recent })),
            }
        }
        "go" => {
            let nav = handle.navigate_to_category(arg)?;
            println!("{}", json!({ "navigate": nav.url, "page": nav.page }));
        }
        other => warn!("unknown command :{other}"),
    }
    Ok(true)
}

async fn print_updates(mut rx: watch::Receiver<SearchSnapshot>) {
    let mut last_phase = SearchPhase::Idle;
    let mut printed_seq = 0;
    while rx.changed().await.is_ok() {
        let snap = rx.borrow_and_update().clone();
        match snap.phase {
            // a repeated query lands with equal results but a new sequence number
            SearchPhase::Results if snap.results_seq != printed_seq => {
                let preview = ResultPreview::from_results(&snap.results);
                match serde_json::to_string(&preview) {
                    Ok(s) => println!("{s}"),
                    Err(e) => warn!("cannot render results: {e}"),
                }
                printed_seq = snap.results_seq;
            }
            SearchPhase::Idle if last_phase != SearchPhase::Idle => {
                let categories: Vec<_> = SEARCH_CATEGORIES
                    .iter()
                    .map(|c| json!({ "key": c.key(), "label": c.label, "page_url": c.page_url() }))
                    .collect();
                println!("{}", json!({ "recent": snap.recent, "categories": categories }));
            }
            _ => {}
        }
        last_phase = snap.phase;
    }
}
