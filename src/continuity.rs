//! Span continuity classification.
//!
//! Decides, for a whole batch of plotted intervals, whether segments are
//! drawn as independent simple spans or as one continuous girder line. The
//! outcome selects the X-coordinate system for every series on the graph,
//! so it is computed once per batch and never per interval.
//!
//! ## Algorithm
//!
//! The batch is `Continuous` iff any requested interval is at or after some
//! closure joint's composite interval, or, when the plot spans all groups,
//! at or after the interval the deck becomes composite. Pretension product
//! loads then override the result to `SimpleSpan` per entry.

use serde::{Deserialize, Serialize};

use crate::types::{GraphEntry, GraphKind, IntervalIndex, LoadSelector, PointOfInterest, ProductLoadType};

/// Structural idealization of the plotted girder line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continuity {
    /// Each segment plotted on its own, in segment-local coordinates.
    SimpleSpan,
    /// The girder line plotted as one member, in girder-line coordinates.
    Continuous,
}

impl Continuity {
    /// True for simple spans.
    pub fn is_simple_span(self) -> bool {
        matches!(self, Self::SimpleSpan)
    }

    /// Plot X coordinate of a point of interest.
    pub fn x_value(self, poi: &PointOfInterest, group_offset: f64) -> f64 {
        match self {
            Self::SimpleSpan => poi.x_segment,
            Self::Continuous => poi.x_girder + group_offset,
        }
    }
}

/// Classifies a batch of intervals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanContinuityClassifier;

impl SpanContinuityClassifier {
    /// Classify a batch.
    ///
    /// `closure_composite` holds the composite interval of every closure
    /// joint on the plotted girders. An empty batch is `SimpleSpan`.
    pub fn classify(
        intervals: &[IntervalIndex],
        closure_composite: &[IntervalIndex],
        last_composite_deck: IntervalIndex,
        all_groups: bool,
    ) -> Continuity {
        let continuous = intervals.iter().any(|interval| {
            closure_composite.iter().any(|closure| closure <= interval)
                || (all_groups && last_composite_deck <= *interval)
        });
        if continuous {
            Continuity::Continuous
        } else {
            Continuity::SimpleSpan
        }
    }

    /// Per-entry override, applied after [`Self::classify`].
    ///
    /// Pretension effects only exist on the individual segments, so they are
    /// always plotted as simple spans.
    pub fn for_entry(batch: Continuity, entry: &GraphEntry) -> Continuity {
        match (entry.kind(), entry.selector()) {
            (GraphKind::Product, LoadSelector::Product(ProductLoadType::Pretension)) => Continuity::SimpleSpan,
            _ => batch,
        }
    }
}
