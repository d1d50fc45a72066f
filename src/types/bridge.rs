//! Bridge description data consumed through [`crate::source::BridgeMetadata`].

use serde::{Deserialize, Serialize};

use super::interval::IntervalIndex;
use super::loading::{LiveLoadType, RatingType};

/// Identifies one girder of one girder group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GirderKey {
    /// Girder group index.
    pub group: usize,
    /// Girder index within the group.
    pub girder: usize,
}

impl GirderKey {
    /// Create a girder key.
    pub const fn new(group: usize, girder: usize) -> Self {
        Self { group, girder }
    }
}

impl std::fmt::Display for GirderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group {} Girder {}", self.group + 1, self.girder + 1)
    }
}

/// Which groups a plot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupSelection {
    /// The whole girder line, every group end to end.
    All,
    /// A single group.
    One(usize),
}

/// Identifies a precast segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    /// Owning girder.
    pub girder: GirderKey,
    /// Segment index along the girder.
    pub segment: usize,
}

impl SegmentKey {
    /// Create a segment key.
    pub const fn new(girder: GirderKey, segment: usize) -> Self {
        Self { girder, segment }
    }
}

/// Point of interest along a girder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Opaque id assigned by the bridge model.
    pub id: u64,
    /// Segment containing the point.
    pub segment: SegmentKey,
    /// Distance from the start face of the segment.
    pub x_segment: f64,
    /// Distance from the start of the girder.
    pub x_girder: f64,
    /// True for points inside closure joints, between segments.
    #[serde(default)]
    pub off_segment: bool,
}

/// Key intervals of the construction timeline for one girder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimeline {
    /// Total number of intervals.
    pub interval_count: usize,
    /// First prestress release.
    pub release: IntervalIndex,
    /// First storage interval.
    pub storage: IntervalIndex,
    /// First segment erection.
    pub first_segment_erection: IntervalIndex,
    /// Deck casting intervals, in casting order. Empty for bridges without a cast deck.
    #[serde(default)]
    pub deck_casts: Vec<IntervalIndex>,
    /// Railing system installation.
    pub railing_system: IntervalIndex,
    /// Overlay installation.
    pub overlay: IntervalIndex,
    /// Live load first applied.
    pub live_load: IntervalIndex,
    /// Load rating live load applied.
    pub load_rating: IntervalIndex,
    /// Temporary support removal, one per temporary support.
    #[serde(default)]
    pub temporary_support_removals: Vec<IntervalIndex>,
    /// Interval each closure joint becomes composite, one per joint.
    #[serde(default)]
    pub closure_composite: Vec<IntervalIndex>,
    /// Interval the last deck region becomes composite.
    pub last_composite_deck: IntervalIndex,
    /// Intervals checked by the stress specification checks.
    #[serde(default)]
    pub spec_check_intervals: Vec<IntervalIndex>,
}

impl IntervalTimeline {
    /// First deck casting, if the bridge has a cast deck.
    pub fn first_cast_deck(&self) -> Option<IntervalIndex> {
        self.deck_casts.first().copied()
    }
}

/// Lifecycle of one precast segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentInfo {
    /// Segment identity.
    pub key: SegmentKey,
    /// Prestress release.
    pub release: IntervalIndex,
    /// Erection onto its supports.
    pub erection: IntervalIndex,
    /// Hauling to the site.
    pub haul: IntervalIndex,
    /// Girder coordinate of the segment start face.
    pub girder_offset: f64,
}

/// Support locations of a segment at one stage, relative to its start face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentGeometry {
    /// Start face (normally 0).
    pub start_face: f64,
    /// Left support point.
    pub left_support: f64,
    /// Right support point.
    pub right_support: f64,
    /// End face (segment length).
    pub end_face: f64,
}

/// Kind of support providing a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SupportId {
    /// Permanent pier or abutment.
    Pier(usize),
    /// Temporary support (erection tower).
    Temporary(usize),
}

/// Support location along a girder, in girder coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Support identity.
    pub id: SupportId,
    /// Location along the girder. Abutments are at the bearing, not the pier line.
    pub x: f64,
}

/// Principal web stress check method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebStressCheck {
    /// Check based on limit-state demands.
    Standard,
    /// Check based on time-step analysis results.
    TimeStep,
}

/// Load rating options for one enabled rating type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingOptions {
    /// Rating type.
    pub rating: RatingType,
    /// Rate for shear.
    #[serde(default)]
    pub rate_for_shear: bool,
    /// Rate for service stress.
    #[serde(default)]
    pub rate_for_stress: bool,
}

/// Vehicles defined for a live load model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveLoadVehicles {
    /// Live load model.
    pub live_load: LiveLoadType,
    /// Vehicle names in vehicle-index order.
    pub names: Vec<String>,
}

/// Bridge features that decide which catalog entries exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeFeatures {
    /// A cast-in-place deck exists.
    pub has_deck: bool,
    /// Deck uses stay-in-place panels.
    pub deck_panels: bool,
    /// Non-zero construction load.
    pub construction_load: bool,
    /// Pedestrian live load on any girder of the line.
    pub pedestrian_load: bool,
    /// Sidewalk dead load on any girder of the line.
    pub sidewalk: bool,
    /// Shear key load on any girder of the line.
    pub shear_key: bool,
    /// Structural longitudinal joints.
    pub longitudinal_joint: bool,
    /// Deck shrinkage stresses are computed.
    pub deck_shrinkage: bool,
    /// Spliced girder bridge (post-tensioned).
    pub spliced: bool,
    /// Time-step loss analysis.
    pub time_step: bool,
    /// Permit live load defined.
    pub permit_live_load: bool,
    /// Fatigue limit state in use (otherwise Service IA).
    pub fatigue_limit_state: bool,
    /// Strength II applies.
    pub strength_ii: bool,
    /// Principal web stress check, if any.
    pub web_stress_check: Option<WebStressCheck>,
    /// Enabled load ratings.
    pub ratings: Vec<RatingOptions>,
    /// Vehicles per live load model.
    pub vehicles: Vec<LiveLoadVehicles>,
}

impl BridgeFeatures {
    /// Vehicle names for a live load model (empty if none are defined).
    pub fn vehicle_names(&self, live_load: LiveLoadType) -> &[String] {
        self.vehicles
            .iter()
            .find(|v| v.live_load == live_load)
            .map(|v| v.names.as_slice())
            .unwrap_or(&[])
    }

    /// Options for a rating type, if it is enabled.
    pub fn rating(&self, rating: RatingType) -> Option<&RatingOptions> {
        self.ratings.iter().find(|r| r.rating == rating)
    }
}
