use crate::collection::Collection;

/// Static descriptor for a search category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCategory {
    pub collection: Collection,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub page: &'static str,
}

impl SearchCategory {
    pub fn key(&self) -> &'static str {
        self.collection.key()
    }

    pub fn page_url(&self) -> String {
        create_page_url(self.page)
    }
}

pub static SEARCH_CATEGORIES: [SearchCategory; 6] = [
    SearchCategory {
        collection: Collection::News,
        label: "Новости",
        icon: "newspaper",
        color: "text-blue-500",
        page: "News",
    },
    SearchCategory {
        collection: Collection::Events,
        label: "События",
        icon: "calendar",
        color: "text-purple-500",
        page: "Events",
    },
    SearchCategory {
        collection: Collection::Products,
        label: "Товары",
        icon: "shopping-bag",
        color: "text-emerald-500",
        page: "Market",
    },
    SearchCategory {
        collection: Collection::Transport,
        label: "Транспорт",
        icon: "bus",
        color: "text-orange-500",
        page: "Transport",
    },
    SearchCategory {
        collection: Collection::Sports,
        label: "Спорт",
        icon: "trophy",
        color: "text-amber-500",
        page: "Sports",
    },
    SearchCategory {
        collection: Collection::Traditions,
        label: "Традиции",
        icon: "landmark",
        color: "text-red-500",
        page: "Traditions",
    },
];

pub fn category(collection: Collection) -> &'static SearchCategory {
    // table is indexed in Collection declaration order
    &SEARCH_CATEGORIES[collection as usize]
}

pub fn category_by_key(key: &str) -> Option<&'static SearchCategory> {
    Collection::from_key(key).map(category)
}

/// Route for a page name: `/` + lowercase name, spaces become `-`.
pub fn create_page_url(page: &str) -> String {
    format!("/{}", page.to_lowercase().replace(' ', "-"))
}
