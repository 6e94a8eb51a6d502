//! Host surface and ready-made filter predicates
//!
//! [`SearchHost`] is the narrow contract a searchable surface implements:
//! the empty-result flags and texts, plus the change notifications a list
//! view reacts to. Everything GUI-shaped (the search box itself, focus,
//! visibility toggling) stays on the host's side of the trait.

use nucleo_matcher::{Config, Matcher, Utf32Str};

/// What a searchable list surface supplies to, and receives from, a
/// [`FilterableList`](crate::core::list::FilterableList).
pub trait SearchHost {
    /// When a filter yields nothing: `true` shows the full base list,
    /// `false` shows an empty list plus an empty-state label.
    fn show_all_on_empty(&self) -> bool;

    /// Label template for "no results for this query". Include `{query}`
    /// where the query string should appear.
    fn no_results_template(&self) -> &str;

    /// Generic label for an empty list with no query in play.
    fn empty_list_text(&self) -> &str;

    /// Receives the recomputed empty-state label.
    fn set_empty_label(&mut self, label: String);

    /// The visible list was replaced; re-render.
    fn data_changed(&mut self);

    /// The previous list (and its indices) are no longer meaningful.
    fn data_invalidated(&mut self);
}

/// Case-insensitive substring predicate over a key extracted from each item.
///
/// Keeps base-list order.
pub fn substring_filter<T, F>(key: F) -> impl Fn(Vec<T>, &str) -> Option<Vec<T>>
where
    F: Fn(&T) -> &str + Send + Sync,
{
    move |items, query| {
        let needle = query.to_lowercase();
        Some(
            items
                .into_iter()
                .filter(|item| key(item).to_lowercase().contains(&needle))
                .collect(),
        )
    }
}

/// Fuzzy predicate over a key extracted from each item, using the nucleo
/// matcher. Results are ordered best match first; ties keep base-list order.
///
/// Uses buffer reuse to minimize allocations while scoring.
pub fn fuzzy_filter<T, F>(key: F) -> impl Fn(Vec<T>, &str) -> Option<Vec<T>>
where
    F: Fn(&T) -> &str + Send + Sync,
{
    move |items, query| {
        let mut matcher = Matcher::new(Config::DEFAULT);
        let query_lowercase = query.to_lowercase();
        let mut needle_buf = Vec::new();
        let needle = Utf32Str::new(&query_lowercase, &mut needle_buf);

        // Reuse one haystack buffer across all items
        let mut haystack_buf = Vec::new();

        let mut scored: Vec<(T, u16)> = Vec::new();
        for item in items {
            let key_lowercase = key(&item).to_lowercase();
            haystack_buf.clear();
            let haystack = Utf32Str::new(&key_lowercase, &mut haystack_buf);
            if let Some(score) = matcher.fuzzy_match(haystack, needle) {
                scored.push((item, score));
            }
        }

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        Some(scored.into_iter().map(|(item, _)| item).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_filter_is_case_insensitive() {
        let filter = substring_filter(String::as_str);
        let items = vec!["Allow SSH".to_string(), "Drop ICMP".to_string()];
        let result = filter(items, "ssh").unwrap();
        assert_eq!(result, ["Allow SSH".to_string()]);
    }

    #[test]
    fn test_substring_filter_keeps_base_order() {
        let filter = substring_filter(String::as_str);
        let items = vec!["bb".to_string(), "ab".to_string(), "ba".to_string()];
        let result = filter(items, "b").unwrap();
        assert_eq!(
            result,
            ["bb".to_string(), "ab".to_string(), "ba".to_string()]
        );
    }

    #[test]
    fn test_fuzzy_filter_drops_non_matches() {
        let filter = fuzzy_filter(String::as_str);
        let items = vec!["System Monospace".to_string(), "Serif".to_string()];
        let result = filter(items, "mono").unwrap();
        assert_eq!(result, ["System Monospace".to_string()]);
    }

    #[test]
    fn test_fuzzy_filter_orders_best_match_first() {
        let filter = fuzzy_filter(String::as_str);
        let items = vec!["performance notes".to_string(), "perf".to_string()];
        let result = filter(items, "perf").unwrap();
        assert_eq!(result.first().map(String::as_str), Some("perf"));
        assert_eq!(result.len(), 2);
    }
}
