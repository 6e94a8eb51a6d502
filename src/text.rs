//! Text helpers for list surfaces

/// Substitutes the query into an empty-state template. The template marks
/// the insertion point with `{query}`; a template without the marker is
/// returned unchanged.
pub fn render_template(template: &str, query: &str) -> String {
    template.replace("{query}", query)
}

/// Truncates a string to a maximum length and adds an ellipsis if needed
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        // Find the nearest character boundary to avoid splitting multi-byte characters
        let end = s
            .char_indices()
            .map(|(idx, _)| idx)
            .take_while(|&idx| idx <= max_len.saturating_sub(3))
            .last()
            .unwrap_or(0);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_substitutes_query() {
        assert_eq!(
            render_template("No results for \"{query}\"", "ssh"),
            "No results for \"ssh\""
        );
    }

    #[test]
    fn test_render_template_without_marker_is_unchanged() {
        assert_eq!(render_template("Nothing here", "ssh"), "Nothing here");
    }

    #[test]
    fn test_truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let truncated = truncate_with_ellipsis("héllo wörld", 8);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 11);
    }
}
