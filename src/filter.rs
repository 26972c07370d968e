//! Pure derived-view pipeline over the catalog.
//!
//! The pipeline reads a state snapshot and the transient criteria and
//! produces a new sequence; it never mutates anything.

use std::collections::HashSet;

use crate::model::CatalogEntry;

/// Transient filter input from the controls bar. Not persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub favorites_only: bool,
}

/// Applies the favorite-scope filter, then the case-folded substring search.
///
/// Scope first narrows the candidate set before substring scans; the two
/// predicates commute, so the order matters only for performance. An empty
/// search term is a no-op. Idempotent: identical inputs always yield the
/// identical ordered sequence, preserving catalog order.
pub fn apply(
    catalog: &[CatalogEntry],
    favorite_ids: &HashSet<u32>,
    criteria: &FilterCriteria,
) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = catalog.to_vec();
    if criteria.favorites_only {
        entries.retain(|entry| favorite_ids.contains(&entry.id()));
    }
    if !criteria.search_term.is_empty() {
        let needle = criteria.search_term.to_lowercase();
        entries.retain(|entry| entry.name.to_lowercase().contains(&needle));
    }
    entries
}
