//! In-memory bridge description and results tables.
//!
//! Used by tests, benches and the demo binary. The bridge description
//! deserializes from JSON.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{BridgeMetadata, ReactionRequest, ResultRequest, ResultsProvider, SegmentReaction};
use crate::types::{
    ActionKind, Bound, BridgeFeatures, GirderKey, GroupSelection, IntervalIndex,
    IntervalTimeline, LoadSelector, PointOfInterest, SegmentGeometry, SegmentInfo, SegmentKey,
    SeriesVariant, Support, SupportId,
};

/// Error type for in-memory sources.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InMemoryError {
    /// Girder not described.
    #[error("Girder not found: {0}")]
    GirderNotFound(GirderKey),
    /// Segment not described.
    #[error("Segment {segment} not found on {girder}", girder = .0.girder, segment = .0.segment)]
    SegmentNotFound(SegmentKey),
    /// No table for the requested results.
    #[error("No results for {action} during {interval}")]
    NoResults {
        /// Requested interval.
        interval: IntervalIndex,
        /// Requested action.
        action: ActionKind,
    },
    /// Failure configured with [`InMemoryResults::fail_for`].
    #[error("Results unavailable for {0:?}")]
    Unavailable(LoadSelector),
}

/// One segment of an in-memory girder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Lifecycle intervals and placement.
    pub info: SegmentInfo,
    /// Support geometry, used for every stage.
    pub geometry: SegmentGeometry,
}

/// One girder of an in-memory bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GirderRecord {
    /// Girder identity.
    pub key: GirderKey,
    /// Girder length.
    pub length: f64,
    /// Offset of the girder start along the girder line.
    #[serde(default)]
    pub group_offset: f64,
    /// Construction timeline.
    pub timeline: IntervalTimeline,
    /// Feature flags.
    #[serde(default)]
    pub features: BridgeFeatures,
    /// Segments in order.
    pub segments: Vec<SegmentRecord>,
    /// Piers and temporary supports.
    #[serde(default)]
    pub supports: Vec<Support>,
    /// Points of interest.
    #[serde(default)]
    pub pois: Vec<PointOfInterest>,
}

/// In-memory bridge description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryBridge {
    /// Girders, any order.
    pub girders: Vec<GirderRecord>,
}

impl InMemoryBridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bridge description from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add a girder.
    pub fn add_girder(&mut self, girder: GirderRecord) {
        self.girders.push(girder);
    }

    fn girder(&self, key: GirderKey) -> Result<&GirderRecord, InMemoryError> {
        self.girders
            .iter()
            .find(|g| g.key == key)
            .ok_or(InMemoryError::GirderNotFound(key))
    }
}

impl BridgeMetadata for InMemoryBridge {
    type Error = InMemoryError;

    fn girder_line(&self, girder: usize, groups: GroupSelection) -> Result<Vec<GirderKey>, Self::Error> {
        match groups {
            GroupSelection::One(group) => {
                let key = GirderKey::new(group, girder);
                self.girder(key)?;
                Ok(vec![key])
            }
            GroupSelection::All => {
                let keys: BTreeSet<GirderKey> = self
                    .girders
                    .iter()
                    .map(|g| g.key)
                    .filter(|k| k.girder == girder)
                    .collect();
                Ok(keys.into_iter().collect())
            }
        }
    }

    fn timeline(&self, girder: GirderKey) -> Result<IntervalTimeline, Self::Error> {
        Ok(self.girder(girder)?.timeline.clone())
    }

    fn features(&self, girder: GirderKey) -> Result<BridgeFeatures, Self::Error> {
        Ok(self.girder(girder)?.features.clone())
    }

    fn segments(&self, girder: GirderKey) -> Result<Vec<SegmentInfo>, Self::Error> {
        Ok(self.girder(girder)?.segments.iter().map(|s| s.info).collect())
    }

    fn segment_geometry(
        &self,
        segment: SegmentKey,
        _interval: IntervalIndex,
    ) -> Result<SegmentGeometry, Self::Error> {
        self.girder(segment.girder)?
            .segments
            .iter()
            .find(|s| s.info.key == segment)
            .map(|s| s.geometry)
            .ok_or(InMemoryError::SegmentNotFound(segment))
    }

    fn points_of_interest(
        &self,
        girder: GirderKey,
        segment: Option<usize>,
        _action: ActionKind,
    ) -> Result<Vec<PointOfInterest>, Self::Error> {
        let mut pois: Vec<PointOfInterest> = self
            .girder(girder)?
            .pois
            .iter()
            .filter(|p| segment.map_or(true, |s| p.segment.segment == s))
            .copied()
            .collect();
        pois.sort_by(|a, b| a.x_girder.total_cmp(&b.x_girder));
        Ok(pois)
    }

    fn supports(&self, girder: GirderKey, include_temporary: bool) -> Result<Vec<Support>, Self::Error> {
        let mut supports: Vec<Support> = self
            .girder(girder)?
            .supports
            .iter()
            .filter(|s| include_temporary || matches!(s.id, SupportId::Pier(_)))
            .copied()
            .collect();
        supports.sort_by(|a, b| a.x.total_cmp(&b.x));
        Ok(supports)
    }

    fn girder_length(&self, girder: GirderKey) -> Result<f64, Self::Error> {
        Ok(self.girder(girder)?.length)
    }

    fn group_offset(&self, girder: GirderKey) -> Result<f64, Self::Error> {
        Ok(self.girder(girder)?.group_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ResultKey {
    interval: IntervalIndex,
    action: ActionKind,
    selector: LoadSelector,
    variant: SeriesVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ReactionKey {
    interval: IntervalIndex,
    selector: LoadSelector,
    variant: SeriesVariant,
}

/// Results tables keyed by interval, load and variant.
///
/// With [`InMemoryResults::synthetic`], lookups without a table return
/// generated values instead of an error: `±(1 + x)` along the girder and
/// `±10·(n + 1)` for the n-th reaction, negative for minimum series.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResults {
    series: BTreeMap<ResultKey, Vec<f64>>,
    segment_reactions: BTreeMap<ReactionKey, Vec<SegmentReaction>>,
    support_reactions: BTreeMap<ReactionKey, Vec<f64>>,
    failing: BTreeSet<LoadSelector>,
    synthetic: bool,
}

impl InMemoryResults {
    /// Create an empty provider that errors on missing tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that generates values for missing tables.
    pub fn synthetic() -> Self {
        Self {
            synthetic: true,
            ..Self::default()
        }
    }

    /// Store the results for one series.
    pub fn insert_results(
        &mut self,
        interval: IntervalIndex,
        action: ActionKind,
        selector: LoadSelector,
        variant: SeriesVariant,
        values: Vec<f64>,
    ) {
        self.series.insert(ResultKey { interval, action, selector, variant }, values);
    }

    /// Store segment end reactions.
    pub fn insert_segment_reactions(
        &mut self,
        interval: IntervalIndex,
        selector: LoadSelector,
        variant: SeriesVariant,
        values: Vec<SegmentReaction>,
    ) {
        self.segment_reactions.insert(ReactionKey { interval, selector, variant }, values);
    }

    /// Store support reactions.
    pub fn insert_support_reactions(
        &mut self,
        interval: IntervalIndex,
        selector: LoadSelector,
        variant: SeriesVariant,
        values: Vec<f64>,
    ) {
        self.support_reactions.insert(ReactionKey { interval, selector, variant }, values);
    }

    /// Make every request for `selector` fail.
    pub fn fail_for(&mut self, selector: LoadSelector) {
        self.failing.insert(selector);
    }

    fn check(&self, selector: LoadSelector) -> Result<(), InMemoryError> {
        if self.failing.contains(&selector) {
            return Err(InMemoryError::Unavailable(selector));
        }
        Ok(())
    }
}

fn sign(variant: &SeriesVariant) -> f64 {
    match variant.effective_bound() {
        Some(Bound::Min) => -1.0,
        _ => 1.0,
    }
}

impl ResultsProvider for InMemoryResults {
    type Error = InMemoryError;

    fn results(&self, request: &ResultRequest<'_>) -> Result<Vec<f64>, Self::Error> {
        self.check(request.selector)?;
        let key = ResultKey {
            interval: request.interval,
            action: request.action,
            selector: request.selector,
            variant: request.variant,
        };
        if let Some(values) = self.series.get(&key) {
            return Ok(values.clone());
        }
        if !self.synthetic {
            return Err(InMemoryError::NoResults {
                interval: request.interval,
                action: request.action,
            });
        }
        let s = sign(&request.variant);
        Ok(request.pois.iter().map(|p| s * (1.0 + p.x_girder)).collect())
    }

    fn segment_reactions(
        &self,
        request: &ReactionRequest,
        segments: &[SegmentKey],
    ) -> Result<Vec<SegmentReaction>, Self::Error> {
        self.check(request.selector)?;
        let key = ReactionKey {
            interval: request.interval,
            selector: request.selector,
            variant: request.variant,
        };
        if let Some(values) = self.segment_reactions.get(&key) {
            return Ok(values.clone());
        }
        if !self.synthetic {
            return Err(InMemoryError::NoResults {
                interval: request.interval,
                action: ActionKind::Reaction,
            });
        }
        let s = sign(&request.variant);
        Ok(segments
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let r = s * 10.0 * (i + 1) as f64;
                SegmentReaction { left: r, right: r }
            })
            .collect())
    }

    fn support_reactions(
        &self,
        request: &ReactionRequest,
        supports: &[Support],
    ) -> Result<Vec<f64>, Self::Error> {
        self.check(request.selector)?;
        let key = ReactionKey {
            interval: request.interval,
            selector: request.selector,
            variant: request.variant,
        };
        if let Some(values) = self.support_reactions.get(&key) {
            return Ok(values.clone());
        }
        if !self.synthetic {
            return Err(InMemoryError::NoResults {
                interval: request.interval,
                action: ActionKind::Reaction,
            });
        }
        let s = sign(&request.variant);
        Ok((0..supports.len()).map(|i| s * 10.0 * (i + 1) as f64).collect())
    }
}
