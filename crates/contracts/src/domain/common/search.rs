/// Types that can be matched against a free-text search box.
pub trait Searchable {
    /// Case-insensitive substring match; an empty (or blank) query matches everything.
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Lower-cased, trimmed query or `None` when the query is blank.
pub fn normalize_query(filter: &str) -> Option<String> {
    let q = filter.trim().to_lowercase();
    if q.is_empty() {
        None
    } else {
        Some(q)
    }
}

/// True when `haystack` contains the already-normalized `query`.
pub fn contains_ci(haystack: Option<&str>, query: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(query))
        .unwrap_or(false)
}

/// Keeps the items matching `filter`, preserving order.
pub fn filter_items<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}
