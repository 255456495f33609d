pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const TRANSPORT_PAGE_SIZE: usize = 100;

/// Matches shown per category before "view all".
pub const PREVIEW_LIMIT: usize = 3;

/// Quiet period before raw input is committed.
pub const DEBOUNCE_MS: u64 = 300;

/// First `PREVIEW_LIMIT` items of a match list.
pub fn preview<T>(items: &[T]) -> &[T] {
    &items[..items.len().min(PREVIEW_LIMIT)]
}
