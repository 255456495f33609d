pub mod category;
pub mod collection;
pub mod error;
pub mod limits;
pub mod record;
pub mod response;

pub use category::{category, category_by_key, create_page_url, SearchCategory, SEARCH_CATEGORIES};
pub use collection::{Collection, OrderHint};
pub use error::{FetchError, FetchResult};
pub use record::SearchableRecord;
pub use response::ResultSet;
