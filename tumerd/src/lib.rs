pub mod config;
pub mod debounce;
pub mod listing;
pub mod provider;
pub mod search;
pub mod session;

pub use tumer_query as query;
