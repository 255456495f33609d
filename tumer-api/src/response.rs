use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "json")]
use serde::Serialize;

use crate::category::category;
use crate::collection::Collection;
use crate::limits::preview;
use crate::record::SearchableRecord;

/// Matches for one committed query, grouped by collection in fetch order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct ResultSet {
    pub query: String,
    pub groups: BTreeMap<Collection, Vec<SearchableRecord>>,
    /// Collections whose fetch failed; their groups are empty.
    pub failed: BTreeSet<Collection>,
}

impl ResultSet {
    /// The empty mapping shown while no query is committed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            groups: BTreeMap::new(),
            failed: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, collection: Collection, records: Vec<SearchableRecord>) {
        self.groups.insert(collection, records);
    }

    pub fn mark_failed(&mut self, collection: Collection) {
        self.groups.entry(collection).or_default();
        self.failed.insert(collection);
    }

    pub fn get(&self, collection: Collection) -> &[SearchableRecord] {
        self.groups
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn preview(&self, collection: Collection) -> &[SearchableRecord] {
        preview(self.get(collection))
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Collections with at least one match, in display order.
    pub fn non_empty(&self) -> impl Iterator<Item = (Collection, &[SearchableRecord])> {
        self.groups
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(c, v)| (*c, v.as_slice()))
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Every collection failed, so the set says nothing about the query.
    pub fn all_failed(&self) -> bool {
        Collection::ALL.iter().all(|c| self.failed.contains(c))
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct PreviewItem {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct PreviewGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub page_url: String,
    pub items: Vec<PreviewItem>,
}

/// Display form of a result set: non-empty categories, first matches only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct ResultPreview {
    pub query: String,
    pub total: usize,
    pub groups: Vec<PreviewGroup>,
    pub failed: Vec<&'static str>,
}

impl ResultPreview {
    pub fn from_results(results: &ResultSet) -> Self {
        let groups = results
            .non_empty()
            .map(|(collection, records)| {
                let cat = category(collection);
                PreviewGroup {
                    key: cat.key(),
                    label: cat.label,
                    count: records.len(),
                    page_url: cat.page_url(),
                    items: preview(records).iter().map(PreviewItem::from_record).collect(),
                }
            })
            .collect();
        Self {
            query: results.query.clone(),
            total: results.total(),
            groups,
            failed: results.failed.iter().map(|c| c.key()).collect(),
        }
    }
}

impl PreviewItem {
    fn from_record(record: &SearchableRecord) -> Self {
        Self {
            id: record.id().to_string(),
            title: record.display_title().to_string(),
            subtitle: record.subtitle().map(str::to_string),
            date: record.display_date().map(str::to_string),
        }
    }
}
