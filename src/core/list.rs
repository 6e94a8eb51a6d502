//! Filterable list model
//!
//! [`FilterableList`] owns two lists: the authoritative base list and the
//! visible list derived from it by the last-applied filter. The host surface
//! (a list view, a picker, a table) reads only the visible list and is told
//! about changes through the [`SearchHost`] trait.
//!
//! Filtering itself is delegated to a predicate supplied by the owning
//! application at construction time. The predicate receives a copy of the
//! base list and the query, and returns the filtered list (`None` meaning
//! empty).
//!
//! # Stale results
//!
//! Hosts that run the predicate off-thread use [`FilterableList::begin_filter`]
//! to stamp each request with a generation and [`FilterableList::publish`] to
//! apply the outcome. A result published for a superseded generation is
//! discarded, so a slow filter can never overwrite a newer one.

use crate::search::SearchHost;
use crate::text::render_template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Predicate applied to a copy of the base list.
///
/// Returning `None` is equivalent to returning an empty list.
pub type FilterFn<T> = Box<dyn Fn(Vec<T>, &str) -> Option<Vec<T>> + Send + Sync>;

/// A generation-stamped filter request, issued by
/// [`FilterableList::begin_filter`] and consumed by
/// [`FilterableList::publish`].
#[derive(Debug, Clone)]
pub struct FilterRequest {
    query: String,
    generation: u64,
}

impl FilterRequest {
    /// The query this request was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Snapshot of the authoritative list, suitable for handing to the host's
/// persistence layer before a suspend.
///
/// The visible list is deliberately dropped: restoring rebuilds it as a full
/// copy of the base, discarding any filter that was active at capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSnapshot<T> {
    items: Vec<T>,
    captured_at: DateTime<Utc>,
}

impl<T> ListSnapshot<T> {
    /// The captured base items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// When the snapshot was taken (UTC).
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// A base list plus the filtered view of it that a display surface renders.
pub struct FilterableList<T> {
    base: Vec<T>,
    visible: Vec<T>,
    filter_fn: FilterFn<T>,
    issued: u64,
    published: u64,
}

impl<T: Clone> FilterableList<T> {
    /// Creates a list with the given items and filter predicate.
    ///
    /// An empty `items` vector is valid: the list degrades to an empty,
    /// functional state rather than failing construction.
    pub fn new<F>(items: Vec<T>, filter_fn: F) -> Self
    where
        F: Fn(Vec<T>, &str) -> Option<Vec<T>> + Send + Sync + 'static,
    {
        let visible = items.clone();
        Self {
            base: items,
            visible,
            filter_fn: Box::new(filter_fn),
            issued: 0,
            published: 0,
        }
    }

    /// Number of visible items.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether the visible list is empty.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// The visible item at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.visible.get(index)
    }

    /// The visible (filtered) list.
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    /// The authoritative base list.
    pub fn items(&self) -> &[T] {
        &self.base
    }

    /// Replaces the base list wholesale and resets the visible list to a
    /// full copy. Outstanding filter requests are invalidated.
    pub fn set_items(&mut self, items: Vec<T>, host: &mut dyn SearchHost) {
        self.base = items;
        self.visible = self.base.clone();
        self.invalidate_requests();
        host.data_invalidated();
    }

    /// Empties both lists. Outstanding filter requests are invalidated.
    pub fn clear(&mut self, host: &mut dyn SearchHost) {
        self.base.clear();
        self.visible.clear();
        self.invalidate_requests();
        host.data_invalidated();
    }

    /// Runs the filter synchronously: issues a request, evaluates the
    /// predicate, and publishes the result.
    ///
    /// An empty query short-circuits to a full copy of the base list without
    /// consulting the predicate; the empty-result policy still applies, so an
    /// empty base list updates the host's empty-state label.
    pub fn filter(&mut self, query: &str, host: &mut dyn SearchHost) {
        let request = self.begin_filter(query);
        let result = self.run_predicate(&request);
        self.publish(request, result, host);
    }

    /// Issues a generation-stamped request for hosts that evaluate the
    /// predicate off-thread. Pair with [`Self::publish`].
    pub fn begin_filter(&mut self, query: &str) -> FilterRequest {
        self.issued += 1;
        FilterRequest {
            query: query.to_string(),
            generation: self.issued,
        }
    }

    /// Evaluates the stored predicate for `request` against a copy of the
    /// current base list.
    pub fn run_predicate(&self, request: &FilterRequest) -> Option<Vec<T>> {
        if request.query.is_empty() {
            Some(self.base.clone())
        } else {
            (self.filter_fn)(self.base.clone(), &request.query)
        }
    }

    /// Publishes a filter outcome, applying the empty-result policy and
    /// notifying the host. Returns `false` if the request was superseded and
    /// the result discarded.
    pub fn publish(
        &mut self,
        request: FilterRequest,
        result: Option<Vec<T>>,
        host: &mut dyn SearchHost,
    ) -> bool {
        if request.generation <= self.published {
            tracing::debug!(
                generation = request.generation,
                published = self.published,
                query = %request.query,
                "discarding stale filter result"
            );
            return false;
        }
        self.published = request.generation;

        let mut values = result.unwrap_or_default();
        if values.is_empty() {
            if host.show_all_on_empty() {
                values = self.base.clone();
            } else if request.query.is_empty() {
                let label = host.empty_list_text().to_string();
                host.set_empty_label(label);
            } else {
                let label = render_template(host.no_results_template(), &request.query);
                host.set_empty_label(label);
            }
        }

        self.visible = values;
        host.data_changed();
        true
    }

    /// Captures the authoritative list for persistence, dropping the visible
    /// list. The `Serialize` bound is the capability check: item types that
    /// cannot be persisted are rejected at compile time.
    pub fn capture_state(&self) -> ListSnapshot<T>
    where
        T: Serialize,
    {
        ListSnapshot {
            items: self.base.clone(),
            captured_at: Utc::now(),
        }
    }

    /// Restores a captured list. The visible list is rebuilt as a full copy
    /// of the base; any filter active at capture time is gone.
    pub fn restore_state(&mut self, snapshot: ListSnapshot<T>, host: &mut dyn SearchHost) {
        self.base = snapshot.items;
        self.visible = self.base.clone();
        self.invalidate_requests();
        host.data_changed();
    }

    // Marks every outstanding request as superseded.
    fn invalidate_requests(&mut self) {
        self.issued += 1;
        self.published = self.issued;
    }
}
