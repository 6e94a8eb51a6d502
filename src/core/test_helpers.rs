//! Shared test utilities for core module tests
//!
//! Provides common test helpers to avoid duplication across test suites.
//! This module is only compiled in test mode.

use crate::search::SearchHost;

/// A [`SearchHost`] double that records every interaction.
///
/// Tests read the counters and the last label instead of asserting through
/// a real view layer.
pub struct RecordingHost {
    pub show_all_on_empty: bool,
    pub no_results_template: String,
    pub empty_list_text: String,
    pub empty_label: Option<String>,
    pub changed: usize,
    pub invalidated: usize,
}

impl RecordingHost {
    /// Creates a host with the given empty-result flag and the default
    /// message texts used throughout the tests.
    pub fn show_all(show_all_on_empty: bool) -> Self {
        Self {
            show_all_on_empty,
            no_results_template: "No results found for \"{query}\".".to_string(),
            empty_list_text: "Nothing to show yet.".to_string(),
            empty_label: None,
            changed: 0,
            invalidated: 0,
        }
    }
}

impl SearchHost for RecordingHost {
    fn show_all_on_empty(&self) -> bool {
        self.show_all_on_empty
    }

    fn no_results_template(&self) -> &str {
        &self.no_results_template
    }

    fn empty_list_text(&self) -> &str {
        &self.empty_list_text
    }

    fn set_empty_label(&mut self, label: String) {
        self.empty_label = Some(label);
    }

    fn data_changed(&mut self) {
        self.changed += 1;
    }

    fn data_invalidated(&mut self) {
        self.invalidated += 1;
    }
}
