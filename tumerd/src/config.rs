use std::path::PathBuf;
use std::time::Duration;

use tumer_api::limits::DEBOUNCE_MS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Fixture,
    Http,
    Memory,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixture" | "fixtures" => Some(ProviderKind::Fixture),
            "http" => Some(ProviderKind::Http),
            "memory" | "mem" => Some(ProviderKind::Memory),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub provider: ProviderKind, // Fixture
    pub fixtures_dir: PathBuf,  // ./fixtures
    pub backend_url: Option<String>,
    pub api_key: Option<String>,

    pub debounce_ms: u64,         // 300
    pub fetch_timeout_ms: u64,    // 10_000
    pub request_timeout_ms: u64,  // 3_000
    pub fetch_retries: u32,       // 2
    pub retry_base_backoff_ms: u64, // 200
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Fixture,
            fixtures_dir: PathBuf::from("fixtures"),
            backend_url: None,
            api_key: None,
            debounce_ms: DEBOUNCE_MS,
            fetch_timeout_ms: 10_000,
            request_timeout_ms: 3_000,
            fetch_retries: 2,
            retry_base_backoff_ms: 200,
        }
    }
}

impl SearchConfig {
    /// - TUMER_PROVIDER (fixture | http | memory, default fixture)
    /// - TUMER_FIXTURES_DIR (default ./fixtures)
    /// - TUMER_BACKEND_URL (required for http)
    /// - TUMER_API_KEY (optional)
    /// - TUMER_DEBOUNCE_MS (default 300)
    /// - TUMER_FETCH_TIMEOUT_MS (default 10000), whole fetch including retries
    /// - TUMER_REQUEST_TIMEOUT_MS (default 3000), one HTTP attempt
    /// - TUMER_FETCH_RETRIES (default 2)
    /// - TUMER_RETRY_BASE_BACKOFF_MS (default 200)
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(kind) = std::env::var("TUMER_PROVIDER")
            .ok()
            .and_then(|s| ProviderKind::parse(&s))
        {
            cfg.provider = kind;
        }
        if let Some(dir) = non_empty_env("TUMER_FIXTURES_DIR") {
            cfg.fixtures_dir = PathBuf::from(dir);
        }
        cfg.backend_url = non_empty_env("TUMER_BACKEND_URL");
        cfg.api_key = non_empty_env("TUMER_API_KEY");

        cfg.debounce_ms = parse_env_u64("TUMER_DEBOUNCE_MS", cfg.debounce_ms);
        cfg.fetch_timeout_ms = parse_env_u64("TUMER_FETCH_TIMEOUT_MS", cfg.fetch_timeout_ms);
        cfg.request_timeout_ms = parse_env_u64("TUMER_REQUEST_TIMEOUT_MS", cfg.request_timeout_ms);
        cfg.fetch_retries = parse_env_u32("TUMER_FETCH_RETRIES", cfg.fetch_retries);
        cfg.retry_base_backoff_ms =
            parse_env_u64("TUMER_RETRY_BASE_BACKOFF_MS", cfg.retry_base_backoff_ms);

        cfg
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Per-attempt HTTP timeout, capped so every configured attempt fits in the fetch timeout.
    pub fn request_timeout(&self) -> Duration {
        let attempts = u64::from(self.fetch_retries).saturating_add(1);
        let share = self.fetch_timeout_ms / attempts;
        Duration::from_millis(self.request_timeout_ms.min(share).max(1))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_search_timing() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.debounce(), Duration::from_millis(300));
        assert_eq!(cfg.provider, ProviderKind::Fixture);
    }

    #[test]
    fn request_timeout_leaves_room_for_retries() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.request_timeout(), Duration::from_millis(3_000));
        assert!(cfg.request_timeout() * (cfg.fetch_retries + 1) <= cfg.fetch_timeout());

        let tight = SearchConfig {
            fetch_timeout_ms: 300,
            fetch_retries: 2,
            ..SearchConfig::default()
        };
        assert_eq!(tight.request_timeout(), Duration::from_millis(100));

        let no_budget = SearchConfig {
            fetch_timeout_ms: 0,
            ..SearchConfig::default()
        };
        assert_eq!(no_budget.request_timeout(), Duration::from_millis(1));
    }

    #[test]
    fn provider_kind_parse() {
        assert_eq!(ProviderKind::parse(" HTTP "), Some(ProviderKind::Http));
        assert_eq!(ProviderKind::parse("mem"), Some(ProviderKind::Memory));
        assert_eq!(ProviderKind::parse("postgres"), None);
    }
}
