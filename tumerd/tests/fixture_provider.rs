use std::path::PathBuf;

use tumer_api::{Collection, FetchError, OrderHint};
use tumerd::listing::{load_listing, ListingFilter};
use tumerd::provider::fixture::FixtureProvider;
use tumerd::provider::RecordFetchProvider;

fn tempdir() -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("tumerd-fixtures-{}-{}", std::process::id(), rand_suffix()));
    std::fs::create_dir_all(&p).unwrap();
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

fn write(dir: &PathBuf, entity: &str, body: &str) {
    std::fs::write(dir.join(format!("{entity}.json")), body).unwrap();
}

#[tokio::test]
async fn orders_and_limits_pages() {
    let dir = tempdir();
    write(
        &dir,
        "NewsArticle",
        r#"[
            {"id":"n1","title":"Старое","created_date":"2024-01-01"},
            {"id":"n2","title":"Новое","created_date":"2024-03-01"},
            {"id":"n3","title":"Без даты"},
            {"id":"n4","title":"Среднее","created_date":"2024-02-01"}
        ]"#,
    );
    let provider = FixtureProvider::new(&dir);

    let page = provider
        .fetch(Collection::News, OrderHint::desc("created_date"), 10)
        .await
        .unwrap();
    let ids: Vec<_> = page.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["n2", "n4", "n1", "n3"]);

    let page = provider
        .fetch(Collection::News, OrderHint::desc("created_date"), 2)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_fixture_is_unavailable() {
    let dir = tempdir();
    let provider = FixtureProvider::new(&dir);
    let err = provider
        .fetch(Collection::Sports, OrderHint::asc("name"), 50)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Unavailable { collection: Collection::Sports, .. }));
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn malformed_rows_are_skipped_but_non_arrays_fail() {
    let dir = tempdir();
    write(&dir, "SportVenue", r#"[{"id":"v1","name":"Дохсун"},{"name":"без id"}]"#);
    write(&dir, "Tradition", r#"{"id":"t1"}"#);
    let provider = FixtureProvider::new(&dir);

    let page = provider
        .fetch(Collection::Sports, OrderHint::asc("name"), 50)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id(), "v1");

    let err = provider
        .fetch(Collection::Traditions, OrderHint::desc("created_date"), 50)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn market_listing_filters_by_text_category_and_availability() {
    let dir = tempdir();
    write(
        &dir,
        "Product",
        r#"[
            {"id":"p1","title":"Рыба муксун","category":"fish","is_available":true,"created_date":"2024-02-01"},
            {"id":"p2","title":"Рыба чир","category":"fish","is_available":false,"created_date":"2024-03-01"},
            {"id":"p3","title":"Рыбные пироги","category":"bakery","created_date":"2024-01-01"},
            {"id":"p4","title":"Строганина из рыбы","category":"fish","created_date":"2024-04-01"}
        ]"#,
    );
    let provider = FixtureProvider::new(&dir);

    let all = load_listing(&provider, Collection::Products, &ListingFilter::new("рыб", "all"))
        .await
        .unwrap();
    let ids: Vec<_> = all.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["p4", "p1", "p3"]);

    let fish = load_listing(&provider, Collection::Products, &ListingFilter::new("", "fish"))
        .await
        .unwrap();
    let ids: Vec<_> = fish.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["p4", "p1"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn events_listing_runs_oldest_first() {
    let dir = tempdir();
    write(
        &dir,
        "Event",
        r#"[
            {"id":"e1","title":"Ысыах","location":"Ус Хатын","date_start":"2024-06-21"},
            {"id":"e2","title":"Концерт","location":"Театр оперы","date_start":"2024-02-10"}
        ]"#,
    );
    let provider = FixtureProvider::new(&dir);

    let page = load_listing(&provider, Collection::Events, &ListingFilter::default())
        .await
        .unwrap();
    let ids: Vec<_> = page.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["e2", "e1"]);

    let page = load_listing(&provider, Collection::Events, &ListingFilter::new("хатын", ""))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}
