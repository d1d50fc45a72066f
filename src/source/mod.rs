//! Data sources consumed by the graph kernel.
//!
//! The kernel never computes engineering results. Bridge description comes
//! from a [`BridgeMetadata`] implementation and numeric results from a
//! [`ResultsProvider`]. Both are synchronous; calls block until the data is
//! available.

pub mod memory;

use crate::types::{
    ActionKind, BridgeFeatures, GirderKey, GraphKind, GroupSelection, IntervalIndex,
    IntervalTimeline, LoadSelector, PointOfInterest, ResultsMode, SegmentGeometry, SegmentInfo,
    SegmentKey, SeriesVariant, Support,
};

/// Bridge geometry, timeline and feature flags.
///
/// Implementations must return points of interest and supports in
/// ascending location order.
pub trait BridgeMetadata {
    /// Error type for metadata lookups.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Girders plotted for a girder index and group selection, in order
    /// along the girder line.
    fn girder_line(&self, girder: usize, groups: GroupSelection) -> Result<Vec<GirderKey>, Self::Error>;

    /// Construction timeline for a girder.
    fn timeline(&self, girder: GirderKey) -> Result<IntervalTimeline, Self::Error>;

    /// Features that decide which catalog entries exist.
    fn features(&self, girder: GirderKey) -> Result<BridgeFeatures, Self::Error>;

    /// Segments of a girder, in order.
    fn segments(&self, girder: GirderKey) -> Result<Vec<SegmentInfo>, Self::Error>;

    /// Support locations of a segment during an interval (casting bed,
    /// storage, hauling or erected), relative to its start face.
    fn segment_geometry(
        &self,
        segment: SegmentKey,
        interval: IntervalIndex,
    ) -> Result<SegmentGeometry, Self::Error>;

    /// Points of interest for one segment, or for the whole girder when
    /// `segment` is `None`.
    fn points_of_interest(
        &self,
        girder: GirderKey,
        segment: Option<usize>,
        action: ActionKind,
    ) -> Result<Vec<PointOfInterest>, Self::Error>;

    /// Piers of the girder's group and, if requested, erection towers.
    fn supports(&self, girder: GirderKey, include_temporary: bool) -> Result<Vec<Support>, Self::Error>;

    /// Length of the girder.
    fn girder_length(&self, girder: GirderKey) -> Result<f64, Self::Error>;

    /// Distance from the start of the girder line to the start of this girder.
    fn group_offset(&self, girder: GirderKey) -> Result<f64, Self::Error>;
}

/// Request for one series of results along a girder.
#[derive(Debug, Clone, Copy)]
pub struct ResultRequest<'a> {
    /// Girder being plotted.
    pub girder: GirderKey,
    /// Interval of the results.
    pub interval: IntervalIndex,
    /// Action plotted.
    pub action: ActionKind,
    /// Kind of the catalog entry.
    pub kind: GraphKind,
    /// Load selected by the catalog entry.
    pub selector: LoadSelector,
    /// Submode, stress fiber and extreme.
    pub variant: SeriesVariant,
    /// Incremental or cumulative.
    pub results_mode: ResultsMode,
    /// Points to report, in order.
    pub pois: &'a [PointOfInterest],
}

/// Request for concentrated reactions.
#[derive(Debug, Clone, Copy)]
pub struct ReactionRequest {
    /// Girder being plotted.
    pub girder: GirderKey,
    /// Interval of the results.
    pub interval: IntervalIndex,
    /// Kind of the catalog entry.
    pub kind: GraphKind,
    /// Load selected by the catalog entry.
    pub selector: LoadSelector,
    /// Submode and extreme.
    pub variant: SeriesVariant,
    /// Incremental or cumulative.
    pub results_mode: ResultsMode,
}

/// Reactions at the two support points of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentReaction {
    /// Reaction at the left support.
    pub left: f64,
    /// Reaction at the right support.
    pub right: f64,
}

/// Source of numeric analysis results.
///
/// Every method returns values aligned with its input list: one value per
/// point of interest, per segment, or per support.
pub trait ResultsProvider {
    /// Error type for result lookups.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Results at each point of interest.
    fn results(&self, request: &ResultRequest<'_>) -> Result<Vec<f64>, Self::Error>;

    /// Segment end reactions before the segments are erected.
    fn segment_reactions(
        &self,
        request: &ReactionRequest,
        segments: &[SegmentKey],
    ) -> Result<Vec<SegmentReaction>, Self::Error>;

    /// Reactions at each support once segments are erected.
    fn support_reactions(
        &self,
        request: &ReactionRequest,
        supports: &[Support],
    ) -> Result<Vec<f64>, Self::Error>;
}

pub use memory::{InMemoryBridge, InMemoryError, InMemoryResults};
