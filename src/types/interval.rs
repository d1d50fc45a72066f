//! Construction interval identifiers.
//!
//! Intervals are numbered from zero in timeline order. Displayed interval
//! numbers are one-based.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

/// Index of a construction/loading interval on the bridge timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalIndex(pub usize);

impl IntervalIndex {
    /// Create a new interval index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based index.
    pub const fn index(self) -> usize {
        self.0
    }

    /// One-based number shown to users ("Interval 3").
    pub const fn number(self) -> usize {
        self.0 + 1
    }
}

impl From<usize> for IntervalIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for IntervalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval {}", self.number())
    }
}

/// Interval argument for catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalFilter {
    /// Match entries regardless of their applicable intervals.
    Any,
    /// Match entries applicable during one interval.
    Only(IntervalIndex),
}

impl IntervalFilter {
    /// True if `intervals` satisfies this filter.
    pub fn matches(&self, intervals: &IntervalSet) -> bool {
        match self {
            Self::Any => true,
            Self::Only(interval) => intervals.contains(*interval),
        }
    }
}

impl From<IntervalIndex> for IntervalFilter {
    fn from(interval: IntervalIndex) -> Self {
        Self::Only(interval)
    }
}

/// Membership-only set of intervals.
///
/// Ordered so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalSet(BTreeSet<IntervalIndex>);

impl IntervalSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// All intervals in `start..end`.
    pub fn range(start: IntervalIndex, end: usize) -> Self {
        Self((start.0..end).map(IntervalIndex).collect())
    }

    /// Add one interval.
    pub fn insert(&mut self, interval: IntervalIndex) {
        self.0.insert(interval);
    }

    /// Add every interval from `other`.
    pub fn extend<I: IntoIterator<Item = IntervalIndex>>(&mut self, other: I) {
        self.0.extend(other);
    }

    /// Membership test.
    pub fn contains(&self, interval: IntervalIndex) -> bool {
        self.0.contains(&interval)
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Intervals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = IntervalIndex> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<IntervalIndex> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = IntervalIndex>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[usize; N]> for IntervalSet {
    fn from(indices: [usize; N]) -> Self {
        indices.into_iter().map(IntervalIndex).collect()
    }
}
