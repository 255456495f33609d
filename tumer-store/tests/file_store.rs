use std::path::PathBuf;

use tumer_store::{keys, open_store, FileStore, KeyValueStore, RecentQueries, StoreBackend, StoreConfig};

fn tempdir() -> PathBuf {
    let mut p = std::env::temp_dir();
    let uniq = format!("tumer-store-{}-{}", std::process::id(), rand_suffix());
    p.push(uniq);
    p
}

fn rand_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:x}", ns)
}

#[test]
fn recent_searches_persist_across_reopen() {
    let dir = tempdir();

    {
        let store = FileStore::open(&dir).expect("open store");
        let mut recent = RecentQueries::load(Box::new(store));
        assert!(recent.entries().is_empty());
        recent.record("якутск").expect("record");
        recent.record("рыба").expect("record");
    }

    {
        let store = FileStore::open(&dir).expect("reopen store");
        let raw = store.get(keys::RECENT_SEARCHES).expect("read").expect("present");
        assert_eq!(raw, r#"["рыба","якутск"]"#);
        let recent = RecentQueries::load(Box::new(store));
        assert_eq!(recent.entries(), ["рыба", "якутск"]);
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_file_does_not_break_startup() {
    let dir = tempdir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("recentSearches.json"), b"\xff\xfe garbage").unwrap();

    let store = FileStore::open(&dir).expect("open store");
    let mut recent = RecentQueries::load(Box::new(store));
    assert!(recent.entries().is_empty());

    // the next record overwrites the corrupt payload
    recent.record("ысыах").expect("record");
    let store = FileStore::open(&dir).expect("reopen store");
    assert_eq!(RecentQueries::load(Box::new(store)).entries(), ["ысыах"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_keys_are_rejected() {
    let dir = tempdir();
    let mut store = FileStore::open(&dir).expect("open store");
    assert!(store.set("../escape", "x").is_err());
    assert!(store.get("a/b").is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn open_store_honors_backend() {
    let cfg = StoreConfig {
        backend: StoreBackend::Memory,
        dir: tempdir(),
    };
    let store = open_store(&cfg).expect("memory store");
    assert_eq!(store.name(), "memory");
    assert!(!cfg.dir.exists());
}
