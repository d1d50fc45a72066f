//! Graph catalog: the set of plottable quantities for the current bridge.
//!
//! The catalog is keyed by [`GraphId`] and iterates in ascending id order.
//! That order is part of the contract: the presentation layer selects the
//! first matching entry by default and assigns colors by ordinal.

pub mod builder;
pub mod shared;

use std::collections::BTreeMap;

use crate::canonical::canonical_hash_hex;
use crate::types::{ActionKind, GraphEntry, GraphId, IntervalFilter};

pub use builder::{add_ts_removal_intervals, CatalogBuilder, RebuildError};
pub use shared::SharedCatalog;

/// Error type for catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No entry with this id.
    #[error("Graph entry not found: {0}")]
    NotFound(GraphId),
    /// An entry with this id is already present.
    #[error("Duplicate graph entry id: {0}")]
    DuplicateId(GraphId),
}

/// One row of a catalog query: display name and id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CatalogMatch {
    /// Entry name.
    pub name: String,
    /// Entry id.
    pub id: GraphId,
}

/// Catalog of graph entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphCatalog {
    entries: BTreeMap<GraphId, GraphEntry>,
}

impl GraphCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Re-adding an existing id is rejected and leaves the
    /// catalog unchanged.
    pub fn add_entry(&mut self, entry: GraphEntry) -> Result<GraphId, CatalogError> {
        let id = entry.id();
        if self.entries.contains_key(&id) {
            return Err(CatalogError::DuplicateId(id));
        }
        self.entries.insert(id, entry);
        Ok(id)
    }

    /// Remove an entry, returning it.
    pub fn remove_entry(&mut self, id: GraphId) -> Result<GraphEntry, CatalogError> {
        self.entries.remove(&id).ok_or(CatalogError::NotFound(id))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look up an entry.
    pub fn get_entry(&self, id: GraphId) -> Result<&GraphEntry, CatalogError> {
        self.entries.get(&id).ok_or(CatalogError::NotFound(id))
    }

    /// True if an entry with this id exists.
    pub fn contains(&self, id: GraphId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Position of `id` in ascending-id order: the number of entries with a
    /// smaller id.
    pub fn ordinal_index(&self, id: GraphId) -> Result<usize, CatalogError> {
        if !self.entries.contains_key(&id) {
            return Err(CatalogError::NotFound(id));
        }
        Ok(self.entries.keys().filter(|other| **other < id).count())
    }

    /// Entries plottable for `action` during `interval`, ascending by id.
    pub fn query_by_interval_and_action(
        &self,
        interval: IntervalFilter,
        action: ActionKind,
    ) -> Vec<CatalogMatch> {
        self.entries
            .values()
            .filter(|e| e.matches(interval, action))
            .map(|e| CatalogMatch {
                name: e.name().to_string(),
                id: e.id(),
            })
            .collect()
    }

    /// Default selection: the smallest matching id.
    pub fn first_id_for(&self, interval: IntervalFilter, action: ActionKind) -> Option<GraphId> {
        self.entries
            .values()
            .find(|e| e.matches(interval, action))
            .map(GraphEntry::id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &GraphEntry> {
        self.entries.values()
    }

    /// Deterministic fingerprint of the catalog contents.
    ///
    /// Two catalogs with the same entries produce the same fingerprint.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<&GraphEntry> = self.entries.values().collect();
        canonical_hash_hex(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionSet, IntervalIndex, IntervalSet, ProductLoadType};

    fn make_entry(id: u32, intervals: IntervalSet, actions: ActionSet) -> GraphEntry {
        GraphEntry::product(
            GraphId(id),
            format!("E{}", id),
            ProductLoadType::Girder,
            intervals,
            actions,
        )
    }

    fn sample_catalog() -> GraphCatalog {
        let mut catalog = GraphCatalog::new();
        let moment_shear = ActionSet::only(ActionKind::Moment).with(ActionKind::Shear);
        catalog.add_entry(make_entry(3, IntervalSet::from([4]), ActionSet::only(ActionKind::Shear))).unwrap();
        catalog.add_entry(make_entry(1, IntervalSet::from([4, 5, 6]), moment_shear)).unwrap();
        catalog.add_entry(make_entry(2, IntervalSet::from([5, 6]), ActionSet::only(ActionKind::Moment))).unwrap();
        catalog
    }

    fn ids(matches: &[CatalogMatch]) -> Vec<u32> {
        matches.iter().map(|m| m.id.value()).collect()
    }

    #[test]
    fn test_get_returns_added_entry() {
        let mut catalog = GraphCatalog::new();
        let entry = make_entry(7, IntervalSet::from([1]), ActionSet::STANDARD);
        let id = catalog.add_entry(entry.clone()).unwrap();
        assert_eq!(catalog.get_entry(id).unwrap(), &entry);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = sample_catalog();
        let before = catalog.clone();
        let err = catalog
            .add_entry(make_entry(2, IntervalSet::new(), ActionSet::STANDARD))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(GraphId(2)));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_missing_entry_not_found() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get_entry(GraphId(99)).unwrap_err(), CatalogError::NotFound(GraphId(99)));
        assert_eq!(catalog.ordinal_index(GraphId(99)).unwrap_err(), CatalogError::NotFound(GraphId(99)));
    }

    #[test]
    fn test_query_examples() {
        let catalog = sample_catalog();
        let at = |i: usize| IntervalFilter::Only(IntervalIndex(i));

        assert_eq!(ids(&catalog.query_by_interval_and_action(at(5), ActionKind::Moment)), vec![1, 2]);
        assert_eq!(ids(&catalog.query_by_interval_and_action(at(4), ActionKind::Shear)), vec![1, 3]);
        assert_eq!(ids(&catalog.query_by_interval_and_action(IntervalFilter::Any, ActionKind::Shear)), vec![1, 3]);
        assert!(catalog.query_by_interval_and_action(at(5), ActionKind::Stress).is_empty());
    }

    #[test]
    fn test_ordinal_index_counts_smaller_ids() {
        let mut catalog = sample_catalog();
        catalog.add_entry(make_entry(10, IntervalSet::new(), ActionSet::STANDARD)).unwrap();
        assert_eq!(catalog.ordinal_index(GraphId(1)).unwrap(), 0);
        assert_eq!(catalog.ordinal_index(GraphId(3)).unwrap(), 2);
        assert_eq!(catalog.ordinal_index(GraphId(10)).unwrap(), 3);

        catalog.remove_entry(GraphId(2)).unwrap();
        assert_eq!(catalog.ordinal_index(GraphId(3)).unwrap(), 1);
    }

    #[test]
    fn test_first_id_for_is_smallest_match() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.first_id_for(IntervalFilter::Only(IntervalIndex(4)), ActionKind::Shear),
            Some(GraphId(1))
        );
        assert_eq!(catalog.first_id_for(IntervalFilter::Any, ActionKind::Reaction), None);
    }

    #[test]
    fn test_fingerprint_ignores_insertion_order() {
        let a = sample_catalog();
        let mut b = GraphCatalog::new();
        for entry in a.iter().cloned().collect::<Vec<_>>().into_iter().rev() {
            b.add_entry(entry).unwrap();
        }
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        b.clear();
        assert!(b.is_empty());
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }
}
