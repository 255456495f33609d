use tumer_api::SearchableRecord;
use tumer_query::contains_ci;

mod aggregate;

pub use aggregate::Aggregator;

/// Title/name or one of the variant's secondary fields contains the needle.
/// `needle` must already be lowercased.
pub fn record_matches(record: &SearchableRecord, needle: &str) -> bool {
    let fields = record.match_fields();
    contains_ci(fields.primary, needle)
        || fields
            .secondary
            .iter()
            .any(|field| contains_ci(*field, needle))
}

/// Stable filter over one collection's page; fetch order is preserved.
pub fn filter_page(records: Vec<SearchableRecord>, needle: &str) -> Vec<SearchableRecord> {
    records
        .into_iter()
        .filter(|r| record_matches(r, needle))
        .collect()
}
