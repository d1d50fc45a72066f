//! # girder-graph-kernel
//!
//! Graph catalog and series assembly for bridge girder analysis results.
//!
//! The kernel answers two questions:
//!
//! > Which loadings can be plotted for this interval and this action?
//!
//! > What point series does the selected loading draw?
//!
//! ## Core Contract
//!
//! 1. Keep a catalog of plottable quantities (product loads, combinations,
//!    live loads, limit states, capacities, ratings), each tagged with the
//!    intervals and actions it applies to
//! 2. Decide whether segments plot as simple spans or as one continuous line
//! 3. Fan a selected entry out into min/max, per-stress-location and
//!    per-support series, and assemble their points from a results provider
//!
//! ## Architecture
//!
//! ```text
//! BridgeMetadata → CatalogBuilder → GraphCatalog (SharedCatalog)
//!                                        ↓
//! GraphViewModel → GraphPlotter → SpanContinuityClassifier
//!                       ↓
//!                 SeriesPlanner → EnvelopeSeriesAssembler | ReactionStepBuilder
//!                                        ↓
//!                                 ResultsProvider
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Catalog iteration and queries are in ascending id order
//! - Same metadata → same catalog → same fingerprint
//! - Series are planned and emitted in a fixed order (min before max,
//!   stress locations top girder to bottom deck)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembler;
pub mod canonical;
pub mod catalog;
pub mod config;
pub mod continuity;
pub mod planner;
pub mod plot;
pub mod reaction;
pub mod source;
pub mod types;
pub mod view_model;

/// Crate version, reported by the demo binary.
pub const KERNEL_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-exports
pub use types::{
    ActionKind, ActionSet, AnalysisMode, Bound, GirderKey, GraphEntry, GraphId, GraphKind,
    GroupSelection, IntervalFilter, IntervalIndex, IntervalSet, LoadSelector, PlannedSeries,
    Point, PointSeries, ResultSubmode, ResultsMode, SeriesVariant, StressLocation,
};
pub use catalog::{
    add_ts_removal_intervals, CatalogBuilder, CatalogError, CatalogMatch, GraphCatalog,
    RebuildError, SharedCatalog,
};
pub use config::{GraphSettings, SettingsError};
pub use continuity::{Continuity, SpanContinuityClassifier};
pub use planner::SeriesPlanner;
pub use assembler::{Assembled, AssemblyError, AssemblyRequest, EnvelopeSeriesAssembler, SeriesFailure};
pub use reaction::{ReactionStepBuilder, ReactionTarget, SegmentSupports, SupportLine};
pub use source::{BridgeMetadata, InMemoryBridge, InMemoryResults, ResultsProvider};
pub use view_model::{GraphMode, GraphViewModel, PlotRequest};
pub use plot::{GraphPlotter, PlotError, PlotOutput};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
