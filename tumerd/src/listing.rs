//! Per-category listing pages: a free-text search plus a category tag filter over the
//! collection's own page. Field sets are narrower than global search.

use tumer_api::{Collection, FetchResult, SearchableRecord};
use tumer_query::{contains_ci, CategoryFilter};

use crate::provider::RecordFetchProvider;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl ListingFilter {
    pub fn new(search: impl Into<String>, category: &str) -> Self {
        Self {
            search: search.into(),
            category: CategoryFilter::parse(category),
        }
    }

    pub fn accepts(&self, record: &SearchableRecord) -> bool {
        if !record.is_available() {
            return false;
        }
        self.matches_search(record) && self.category.accepts(record.category())
    }

    fn matches_search(&self, record: &SearchableRecord) -> bool {
        let needle = self.search.to_lowercase();
        match record {
            // traditions are browsed by category only
            SearchableRecord::Tradition(_) => true,
            SearchableRecord::News(_) | SearchableRecord::Product(_) => {
                contains_ci(record.primary_text(), &needle)
            }
            SearchableRecord::TransportStop(_) => {
                contains_ci(record.primary_text(), &needle)
                    || record.routes().iter().any(|r| r.contains(self.search.as_str()))
            }
            SearchableRecord::Event(_) | SearchableRecord::SportVenue(_) => {
                let fields = record.match_fields();
                contains_ci(fields.primary, &needle) || contains_ci(fields.secondary[0], &needle)
            }
        }
    }
}

/// Stable filter preserving fetch order.
pub fn filter_listing(records: Vec<SearchableRecord>, filter: &ListingFilter) -> Vec<SearchableRecord> {
    records.into_iter().filter(|r| filter.accepts(r)).collect()
}

/// Fetch a collection with its listing order and apply the filter.
pub async fn load_listing(
    provider: &dyn RecordFetchProvider,
    collection: Collection,
    filter: &ListingFilter,
) -> FetchResult<Vec<SearchableRecord>> {
    let (order, limit) = collection.listing_plan();
    let page = provider.fetch(collection, order, limit).await?;
    Ok(filter_listing(page, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumer_api::record::{NewsArticle, Product, TransportStop};

    #[test]
    fn empty_search_and_all_category_accept_everything_available() {
        let f = ListingFilter::new("", "all");
        let r = SearchableRecord::News(NewsArticle { id: "1".into(), ..Default::default() });
        assert!(f.accepts(&r));
    }

    #[test]
    fn news_listing_ignores_summary() {
        let f = ListingFilter::new("якутск", "all");
        let r = SearchableRecord::News(NewsArticle {
            id: "1".into(),
            title: Some("Погода".into()),
            summary: Some("В Якутске мороз".into()),
            ..Default::default()
        });
        assert!(!f.accepts(&r));
    }

    #[test]
    fn unavailable_products_are_hidden() {
        let f = ListingFilter::new("", "all");
        let r = SearchableRecord::Product(Product {
            id: "p".into(),
            title: Some("Жеребятина".into()),
            is_available: Some(false),
            ..Default::default()
        });
        assert!(!f.accepts(&r));
    }

    #[test]
    fn route_numbers_match_case_sensitively() {
        let stop = SearchableRecord::TransportStop(TransportStop {
            id: "s".into(),
            name: Some("Автовокзал".into()),
            routes: Some(vec!["8А".into(), "17".into()]),
            ..Default::default()
        });
        assert!(ListingFilter::new("17", "all").accepts(&stop));
        assert!(ListingFilter::new("8А", "all").accepts(&stop));
        assert!(!ListingFilter::new("8а", "all").accepts(&stop));
        assert!(!ListingFilter::new("", "fish").accepts(&stop));
    }
}
