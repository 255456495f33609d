use std::sync::Arc;
use std::time::{Duration, Instant};

use tumer_api::record::{Event, NewsArticle, Product, SportVenue, TransportStop, Tradition};
use tumer_api::{Collection, SearchableRecord};
use tumerd::provider::memory::MemoryProvider;
use tumerd::query::normalize_query;
use tumerd::search::{record_matches, Aggregator};

fn city_records() -> Vec<SearchableRecord> {
    vec![
        SearchableRecord::News(NewsArticle {
            id: "n1".into(),
            title: Some("Открытие моста через Лену".into()),
            summary: Some("Строительство начнётся весной".into()),
            ..Default::default()
        }),
        SearchableRecord::Event(Event {
            id: "e1".into(),
            title: Some("Ысыах Туймаады".into()),
            location: Some("Ус Хатын".into()),
            ..Default::default()
        }),
        SearchableRecord::Product(Product {
            id: "p1".into(),
            title: Some("Свежая рыба".into()),
            seller_name: Some("Артель Лена".into()),
            ..Default::default()
        }),
        SearchableRecord::Product(Product {
            id: "p2".into(),
            title: Some("Оленина".into()),
            seller_name: Some("Хозяйство Оймякон".into()),
            ..Default::default()
        }),
        SearchableRecord::TransportStop(TransportStop {
            id: "s1".into(),
            name: Some("Площадь Ленина".into()),
            district: Some("Якутск".into()),
            ..Default::default()
        }),
        SearchableRecord::SportVenue(SportVenue {
            id: "v1".into(),
            name: Some("Дохсун".into()),
            address: Some("ул. Кирова, 1".into()),
            ..Default::default()
        }),
        SearchableRecord::Tradition(Tradition {
            id: "t1".into(),
            title: Some("Осуохай".into()),
            title_sakha: Some("Оһуохай".into()),
            ..Default::default()
        }),
    ]
}

fn aggregator(provider: MemoryProvider) -> Aggregator {
    Aggregator::new(Arc::new(provider), Duration::from_secs(2))
}

#[tokio::test]
async fn only_products_match_fish() {
    let agg = aggregator(MemoryProvider::new().with_records(city_records()));
    let rs = agg.aggregate(&normalize_query("рыба").unwrap()).await;

    assert_eq!(rs.query, "рыба");
    assert_eq!(rs.groups.len(), 6);
    let non_empty: Vec<_> = rs.non_empty().map(|(c, v)| (c, v.len())).collect();
    assert_eq!(non_empty, vec![(Collection::Products, 1)]);
    assert_eq!(rs.get(Collection::Products)[0].id(), "p1");
    assert!(!rs.has_failures());
}

#[tokio::test]
async fn district_matches_even_when_name_does_not() {
    let agg = aggregator(MemoryProvider::new().with_records(city_records()));
    let rs = agg.aggregate(&normalize_query("якутск").unwrap()).await;

    let stops = rs.get(Collection::Transport);
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].id(), "s1");
    assert!(!stops[0].primary_text().unwrap().to_lowercase().contains("якутск"));
}

#[tokio::test]
async fn every_returned_record_contains_the_query() {
    let agg = aggregator(MemoryProvider::new().with_records(city_records()));
    for raw in ["ЛЕНА", "ле", "ой", "оһуох", "1"] {
        let q = normalize_query(raw).unwrap();
        let rs = agg.aggregate(&q).await;
        for (collection, records) in rs.non_empty() {
            for r in records {
                assert!(record_matches(r, &q.needle), "{collection}/{} for {raw}", r.id());
                assert_eq!(r.collection(), collection);
            }
        }
    }
}

#[tokio::test]
async fn same_query_twice_yields_equal_results() {
    let agg = aggregator(MemoryProvider::new().with_records(city_records()));
    let q = normalize_query("ле").unwrap();
    let first = agg.aggregate(&q).await;
    let second = agg.aggregate(&q).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_collection_does_not_abort_the_others() {
    let provider = MemoryProvider::new()
        .with_records(city_records())
        .failing(Collection::Products);
    let rs = aggregator(provider).aggregate(&normalize_query("лен").unwrap()).await;

    assert!(rs.failed.contains(&Collection::Products));
    assert!(rs.get(Collection::Products).is_empty());
    assert_eq!(rs.get(Collection::Transport).len(), 1);
    assert_eq!(rs.get(Collection::News).len(), 1);
}

#[tokio::test]
async fn slow_collection_times_out_alone() {
    let provider = MemoryProvider::new()
        .with_records(city_records())
        .with_latency(Collection::Sports, Duration::from_millis(500));
    let agg = Aggregator::new(Arc::new(provider), Duration::from_millis(50));
    let start = Instant::now();
    let rs = agg.aggregate(&normalize_query("дохсун").unwrap()).await;

    assert!(start.elapsed() < Duration::from_millis(400), "elapsed {:?}", start.elapsed());
    assert_eq!(rs.failed.iter().copied().collect::<Vec<_>>(), vec![Collection::Sports]);
    assert!(rs.is_empty());
}

#[tokio::test]
async fn fetches_run_concurrently() {
    let mut provider = MemoryProvider::new().with_records(city_records());
    for c in Collection::ALL {
        provider = provider.with_latency(c, Duration::from_millis(60));
    }
    let provider = Arc::new(provider);
    let agg = Aggregator::new(provider.clone(), Duration::from_secs(2));
    let start = Instant::now();
    agg.aggregate(&normalize_query("а").unwrap()).await;
    let elapsed = start.elapsed();

    // six sequential fetches would need >= 360ms
    assert!(elapsed < Duration::from_millis(300), "elapsed too large: {:?}", elapsed);
    assert_eq!(provider.fetch_count(), 6);
}
