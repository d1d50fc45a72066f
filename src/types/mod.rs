//! Core types for the graph kernel.

pub mod action;
pub mod bridge;
pub mod entry;
pub mod interval;
pub mod loading;
pub mod series;

pub use action::{ActionKind, ActionSet};
pub use bridge::{
    BridgeFeatures, GirderKey, GroupSelection, IntervalTimeline, LiveLoadVehicles,
    PointOfInterest, RatingOptions, SegmentGeometry, SegmentInfo, SegmentKey, Support, SupportId,
    WebStressCheck,
};
pub use entry::{EntryError, GraphEntry, GraphId, GraphKind, LoadSelector};
pub use interval::{IntervalFilter, IntervalIndex, IntervalSet};
pub use loading::{
    CombinedLoadType, LimitState, LiveLoadType, ProductLoadType, RatingAction, RatingType,
};
pub use series::{
    AnalysisMode, Bound, LineStyle, PlannedSeries, Point, PointSeries, ResultSubmode,
    ResultsMode, SeriesVariant, StressLocation,
};
