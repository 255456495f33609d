#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::collection::Collection;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct NewsArticle {
    pub id: String,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Event {
    pub id: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub date_start: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Product {
    pub id: String,
    pub title: Option<String>,
    pub seller_name: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct TransportStop {
    pub id: String,
    pub name: Option<String>,
    pub district: Option<String>,
    pub routes: Option<Vec<String>>,
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SportVenue {
    pub id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Tradition {
    pub id: String,
    pub title: Option<String>,
    pub title_sakha: Option<String>,
    pub category: Option<String>,
    pub created_date: Option<String>,
}

/// A record from any collection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SearchableRecord {
    News(NewsArticle),
    Event(Event),
    Product(Product),
    TransportStop(TransportStop),
    SportVenue(SportVenue),
    Tradition(Tradition),
}

/// Text fields consulted by the global search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFields<'a> {
    pub primary: Option<&'a str>,
    pub secondary: [Option<&'a str>; 2],
}

impl SearchableRecord {
    pub fn id(&self) -> &str {
        match self {
            SearchableRecord::News(r) => &r.id,
            SearchableRecord::Event(r) => &r.id,
            SearchableRecord::Product(r) => &r.id,
            SearchableRecord::TransportStop(r) => &r.id,
            SearchableRecord::SportVenue(r) => &r.id,
            SearchableRecord::Tradition(r) => &r.id,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            SearchableRecord::News(_) => Collection::News,
            SearchableRecord::Event(_) => Collection::Events,
            SearchableRecord::Product(_) => Collection::Products,
            SearchableRecord::TransportStop(_) => Collection::Transport,
            SearchableRecord::SportVenue(_) => Collection::Sports,
            SearchableRecord::Tradition(_) => Collection::Traditions,
        }
    }

    /// Title for news, events, products and traditions; name for stops and venues.
    pub fn primary_text(&self) -> Option<&str> {
        match self {
            SearchableRecord::News(r) => r.title.as_deref(),
            SearchableRecord::Event(r) => r.title.as_deref(),
            SearchableRecord::Product(r) => r.title.as_deref(),
            SearchableRecord::TransportStop(r) => r.name.as_deref(),
            SearchableRecord::SportVenue(r) => r.name.as_deref(),
            SearchableRecord::Tradition(r) => r.title.as_deref(),
        }
    }

    pub fn match_fields(&self) -> MatchFields<'_> {
        let secondary = match self {
            SearchableRecord::News(r) => r.summary.as_deref(),
            SearchableRecord::Event(r) => r.location.as_deref(),
            SearchableRecord::Product(r) => r.seller_name.as_deref(),
            SearchableRecord::TransportStop(r) => r.district.as_deref(),
            SearchableRecord::SportVenue(r) => r.address.as_deref(),
            SearchableRecord::Tradition(r) => r.title_sakha.as_deref(),
        };
        MatchFields {
            primary: self.primary_text(),
            secondary: [secondary, None],
        }
    }

    pub fn display_title(&self) -> &str {
        self.primary_text().unwrap_or_default()
    }

    /// First present of summary, location, address, seller name, district.
    pub fn subtitle(&self) -> Option<&str> {
        match self {
            SearchableRecord::News(r) => r.summary.as_deref(),
            SearchableRecord::Event(r) => r.location.as_deref(),
            SearchableRecord::Product(r) => r.seller_name.as_deref(),
            SearchableRecord::TransportStop(r) => r.district.as_deref(),
            SearchableRecord::SportVenue(r) => r.address.as_deref(),
            SearchableRecord::Tradition(_) => None,
        }
    }

    pub fn display_date(&self) -> Option<&str> {
        match self {
            SearchableRecord::Event(r) => r.date_start.as_deref().or(r.created_date.as_deref()),
            other => other.field("created_date"),
        }
    }

    /// Listing category tag, where the collection has one.
    pub fn category(&self) -> Option<&str> {
        match self {
            SearchableRecord::News(r) => r.category.as_deref(),
            SearchableRecord::Event(r) => r.category.as_deref(),
            SearchableRecord::Product(r) => r.category.as_deref(),
            SearchableRecord::Tradition(r) => r.category.as_deref(),
            SearchableRecord::TransportStop(_) | SearchableRecord::SportVenue(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            SearchableRecord::Product(r) => r.is_available != Some(false),
            _ => true,
        }
    }

    pub fn routes(&self) -> &[String] {
        match self {
            SearchableRecord::TransportStop(r) => r.routes.as_deref().unwrap_or_default(),
            _ => &[],
        }
    }

    /// Named text field lookup, used for best-effort ordering.
    pub fn field(&self, name: &str) -> Option<&str> {
        match (self, name) {
            (_, "id") => Some(self.id()),
            (_, "title") | (_, "name") => self.primary_text(),
            (SearchableRecord::News(r), "created_date") => r.created_date.as_deref(),
            (SearchableRecord::Event(r), "created_date") => r.created_date.as_deref(),
            (SearchableRecord::Event(r), "date_start") => r.date_start.as_deref(),
            (SearchableRecord::Product(r), "created_date") => r.created_date.as_deref(),
            (SearchableRecord::TransportStop(r), "created_date") => r.created_date.as_deref(),
            (SearchableRecord::SportVenue(r), "created_date") => r.created_date.as_deref(),
            (SearchableRecord::Tradition(r), "created_date") => r.created_date.as_deref(),
            _ => None,
        }
    }

    /// Decode one backend row for the given collection.
    #[cfg(feature = "json")]
    pub fn from_json(
        collection: Collection,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match collection {
            Collection::News => SearchableRecord::News(serde_json::from_value(value)?),
            Collection::Events => SearchableRecord::Event(serde_json::from_value(value)?),
            Collection::Products => SearchableRecord::Product(serde_json::from_value(value)?),
            Collection::Transport => SearchableRecord::TransportStop(serde_json::from_value(value)?),
            Collection::Sports => SearchableRecord::SportVenue(serde_json::from_value(value)?),
            Collection::Traditions => SearchableRecord::Tradition(serde_json::from_value(value)?),
        })
    }
}
