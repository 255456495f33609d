use std::fmt;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::limits::{DEFAULT_PAGE_SIZE, TRANSPORT_PAGE_SIZE};

/// One of the six independent record sources.
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Collection {
    News,
    Events,
    Products,
    Transport,
    Sports,
    Traditions,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::News,
        Collection::Events,
        Collection::Products,
        Collection::Transport,
        Collection::Sports,
        Collection::Traditions,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::News => "news",
            Collection::Events => "events",
            Collection::Products => "products",
            Collection::Transport => "transport",
            Collection::Sports => "sports",
            Collection::Traditions => "traditions",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Collection::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }

    /// Entity name on the hosted backend.
    pub fn entity_name(self) -> &'static str {
        match self {
            Collection::News => "NewsArticle",
            Collection::Events => "Event",
            Collection::Products => "Product",
            Collection::Transport => "TransportStop",
            Collection::Sports => "SportVenue",
            Collection::Traditions => "Tradition",
        }
    }

    /// Order and page size used by global search.
    pub fn search_plan(self) -> (OrderHint, usize) {
        match self {
            Collection::News => (OrderHint::desc("created_date"), DEFAULT_PAGE_SIZE),
            Collection::Events => (OrderHint::desc("date_start"), DEFAULT_PAGE_SIZE),
            Collection::Products => (OrderHint::desc("created_date"), DEFAULT_PAGE_SIZE),
            Collection::Transport => (OrderHint::asc("name"), TRANSPORT_PAGE_SIZE),
            Collection::Sports => (OrderHint::asc("name"), DEFAULT_PAGE_SIZE),
            Collection::Traditions => (OrderHint::desc("created_date"), DEFAULT_PAGE_SIZE),
        }
    }

    /// Order and page size used by the collection's own listing page.
    pub fn listing_plan(self) -> (OrderHint, usize) {
        match self {
            Collection::Events => (OrderHint::asc("date_start"), DEFAULT_PAGE_SIZE),
            Collection::Transport => (OrderHint::desc("created_date"), TRANSPORT_PAGE_SIZE),
            other => other.search_plan(),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sort directive passed to the backend, honored best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderHint {
    pub field: &'static str,
    pub descending: bool,
}

impl OrderHint {
    pub const fn asc(field: &'static str) -> Self {
        Self { field, descending: false }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self { field, descending: true }
    }

    /// Backend form: `-field` for descending, `field` otherwise.
    pub fn as_sort_param(&self) -> String {
        if self.descending {
            format!("-{}", self.field)
        } else {
            self.field.to_string()
        }
    }
}
