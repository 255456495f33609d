use std::time::Instant;
use std::{env, io};
use serde_json::json;

use tumer_api::record::{Event, NewsArticle, Product, SportVenue, TransportStop, Tradition};
use tumer_api::{Collection, SearchableRecord};
use tumerd::query::normalize_query;
use tumerd::search::filter_page;

fn main() -> io::Result<()> {
    let records: usize = env::var("BENCH_RECORDS").ok().and_then(|s| s.parse().ok()).unwrap_or(100);
    let queries: usize = env::var("BENCH_QUERIES").ok().and_then(|s| s.parse().ok()).unwrap_or(1_000);
    let output = env::var("BENCH_OUTPUT").unwrap_or_else(|_| "json".to_string());

    // Synthetic pages, one per collection
    let pages: Vec<(Collection, Vec<SearchableRecord>)> = Collection::ALL
        .into_iter()
        .map(|c| (c, (0..records).map(|i| synthetic(c, i)).collect()))
        .collect();

    let needles = ["рыба", "якутск", "театр", "zzz-no-match"];
    let mut latencies: Vec<u128> = Vec::with_capacity(queries);
    let mut matched_total = 0usize;
    let t0 = Instant::now();
    for i in 0..queries {
        let Some(q) = normalize_query(needles[i % needles.len()]) else { continue };
        let start = Instant::now();
        for (_, page) in &pages {
            matched_total += filter_page(page.clone(), &q.needle).len();
        }
        latencies.push(start.elapsed().as_micros());
    }
    let elapsed = t0.elapsed();

    latencies.sort_unstable();
    let p = |q: f64| -> u128 {
        if latencies.is_empty() { return 0; }
        let idx = ((latencies.len() as f64 - 1.0) * q).round() as usize;
        latencies[idx]
    };
    let p50 = p(0.50);
    let p95 = p(0.95);
    let p99 = p(0.99);
    let mean = if latencies.is_empty() { 0.0 } else { (latencies.iter().sum::<u128>() as f64) / (latencies.len() as f64) };
    let qps = if elapsed.as_secs_f64() > 0.0 { (queries as f64) / elapsed.as_secs_f64() } else { f64::INFINITY };

    if output == "json" {
        let out = json!({
            "records_per_collection": records,
            "collections": pages.len(),
            "queries": queries,
            "matched_total": matched_total,
            "search_time_ms": elapsed.as_millis(),
            "qps": qps,
            "latency_us": { "p50": p50, "p95": p95, "p99": p99, "mean": mean },
        });
        println!("{}", out);
    } else {
        println!("records={} queries={} matched={} qps={:.1} p50_us={} p95_us={} p99_us={}",
                 records, queries, matched_total, qps, p50, p95, p99);
    }

    Ok(())
}

fn synthetic(collection: Collection, i: usize) -> SearchableRecord {
    let id = format!("{}-{}", collection.key(), i);
    let title = match i % 4 {
        0 => "Свежая рыба с Лены",
        1 => "Концерт в Якутске",
        2 => "Премьера в театре Олонхо",
        _ => "Прогноз погоды на неделю",
    };
    let secondary = if i % 3 == 0 { Some("Якутск".to_string()) } else { None };
    match collection {
        Collection::News => SearchableRecord::News(NewsArticle { id, title: Some(title.into()), summary: secondary, ..Default::default() }),
        Collection::Events => SearchableRecord::Event(Event { id, title: Some(title.into()), location: secondary, ..Default::default() }),
        Collection::Products => SearchableRecord::Product(Product { id, title: Some(title.into()), seller_name: secondary, ..Default::default() }),
        Collection::Transport => SearchableRecord::TransportStop(TransportStop { id, name: Some(title.into()), district: secondary, ..Default::default() }),
        Collection::Sports => SearchableRecord::SportVenue(SportVenue { id, name: Some(title.into()), address: secondary, ..Default::default() }),
        Collection::Traditions => SearchableRecord::Tradition(Tradition { id, title: Some(title.into()), title_sakha: secondary, ..Default::default() }),
    }
}
