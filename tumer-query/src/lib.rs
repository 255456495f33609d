#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// The committed input exactly as typed.
    pub raw: String,
    /// Lowercased form used for containment checks.
    pub needle: String,
}

/// Normalize a committed query for matching.
/// - Returns `None` when the input is empty after trimming.
/// - The needle is the Unicode lowercase of the raw input; surrounding spaces are kept.
pub fn normalize_query(input: &str) -> Option<NormalizedQuery> {
    if input.trim().is_empty() {
        return None;
    }
    Some(NormalizedQuery {
        raw: input.to_string(),
        needle: input.to_lowercase(),
    })
}

/// Case-insensitive substring check against an already lowercased needle.
/// Absent fields never match.
pub fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) => h.to_lowercase().contains(needle),
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `all` (any case) and blank values select everything.
    pub fn parse(input: &str) -> Self {
        let v = strip_quotes(input.trim());
        if v.is_empty() || v.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(v.to_string())
        }
    }

    /// Records without a category only pass `All`.
    pub fn accepts(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(want) => category == Some(want.as_str()),
        }
    }
}

fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}
