//! Series variants and point sequences.

use serde::{Deserialize, Serialize};

/// Structural analysis mode chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Each span analyzed as simply supported.
    SimpleSpan,
    /// Spans analyzed as continuous.
    ContinuousSpan,
    /// Envelope of the simple and continuous analyses.
    Envelope,
}

impl AnalysisMode {
    /// Parse a mode name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" | "simplespan" | "simple_span" => Some(Self::SimpleSpan),
            "continuous" | "continuousspan" | "continuous_span" => Some(Self::ContinuousSpan),
            "envelope" => Some(Self::Envelope),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SimpleSpan => write!(f, "simple"),
            Self::ContinuousSpan => write!(f, "continuous"),
            Self::Envelope => write!(f, "envelope"),
        }
    }
}

/// Whether results are reported for one interval or summed to date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultsMode {
    /// Change during the interval only.
    Incremental,
    /// Sum of all intervals up to and including this one.
    #[default]
    Cumulative,
}

/// Analysis submode requested from the results provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResultSubmode {
    /// Simple span results.
    SimpleSpan,
    /// Continuous span results.
    ContinuousSpan,
    /// Minimum of the simple/continuous envelope.
    MinEnvelope,
    /// Maximum of the simple/continuous envelope.
    MaxEnvelope,
}

impl ResultSubmode {
    /// The non-envelope submode matching an analysis mode.
    pub fn for_mode(mode: AnalysisMode) -> Self {
        match mode {
            AnalysisMode::SimpleSpan => Self::SimpleSpan,
            AnalysisMode::ContinuousSpan => Self::ContinuousSpan,
            AnalysisMode::Envelope => Self::MaxEnvelope,
        }
    }

    /// Envelope submode for an extreme.
    pub fn envelope(bound: Bound) -> Self {
        match bound {
            Bound::Min => Self::MinEnvelope,
            Bound::Max => Self::MaxEnvelope,
        }
    }
}

/// Extreme of a bounded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bound {
    /// Minimum.
    Min,
    /// Maximum.
    Max,
}

/// Fiber at which a flexural stress is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressLocation {
    /// Top of girder.
    TopGirder,
    /// Bottom of girder.
    BottomGirder,
    /// Top of deck.
    TopDeck,
    /// Bottom of deck.
    BottomDeck,
}

impl StressLocation {
    /// Every location in plotting order.
    pub const ALL: [StressLocation; 4] = [
        Self::TopGirder,
        Self::BottomGirder,
        Self::TopDeck,
        Self::BottomDeck,
    ];

    /// Suffix appended to series labels.
    pub fn label_suffix(self) -> &'static str {
        match self {
            Self::TopGirder => " - Top Girder",
            Self::BottomGirder => " - Bottom Girder",
            Self::TopDeck => " - Top Deck",
            Self::BottomDeck => " - Bottom Deck",
        }
    }

    /// Envelope extreme plotted for this location.
    ///
    /// Top of girder shows the maximum, every other fiber the minimum.
    pub fn envelope_bound(self) -> Bound {
        match self {
            Self::TopGirder => Bound::Max,
            Self::BottomGirder | Self::TopDeck | Self::BottomDeck => Bound::Min,
        }
    }

    /// Line style distinguishing this location.
    pub fn line_style(self) -> LineStyle {
        match self {
            Self::TopGirder => LineStyle::Solid,
            Self::BottomGirder => LineStyle::Dash,
            Self::TopDeck => LineStyle::Dot,
            Self::BottomDeck => LineStyle::DashDot,
        }
    }

    /// True for girder fibers.
    pub fn is_girder(self) -> bool {
        matches!(self, Self::TopGirder | Self::BottomGirder)
    }
}

/// One series to draw: submode, optional stress fiber, optional extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesVariant {
    /// Analysis submode.
    pub submode: ResultSubmode,
    /// Stress fiber, for stress actions.
    pub stress_location: Option<StressLocation>,
    /// Extreme of a bounded result (limit states, live load) in a
    /// non-envelope mode.
    pub bound: Option<Bound>,
}

impl SeriesVariant {
    /// Variant with only a submode.
    pub const fn submode(submode: ResultSubmode) -> Self {
        Self {
            submode,
            stress_location: None,
            bound: None,
        }
    }

    /// Variant for a stress fiber.
    pub const fn stress(submode: ResultSubmode, location: StressLocation) -> Self {
        Self {
            submode,
            stress_location: Some(location),
            bound: None,
        }
    }

    /// Extreme this variant represents, if any.
    pub fn effective_bound(&self) -> Option<Bound> {
        match (self.bound, self.submode) {
            (Some(b), _) => Some(b),
            (None, ResultSubmode::MinEnvelope) => Some(Bound::Min),
            (None, ResultSubmode::MaxEnvelope) => Some(Bound::Max),
            _ => None,
        }
    }
}

/// Pen style of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineStyle {
    /// Continuous line.
    Solid,
    /// Dashed.
    Dash,
    /// Dotted.
    Dot,
    /// Alternating dash and dot.
    DashDot,
}

/// A series variant together with its presentation attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedSeries {
    /// What to request from the results provider.
    pub variant: SeriesVariant,
    /// Pen style.
    pub style: LineStyle,
    /// Pen weight.
    pub weight: u32,
    /// First series of a group; only it carries the legend label.
    pub primary: bool,
}

/// One (x, y) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the girder.
    pub x: f64,
    /// Result value.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Ordered point list for one drawn series.
///
/// X values may repeat or go backwards; the order is the drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    /// Legend label; empty for secondary series.
    pub label: String,
    /// Variant this series was assembled from.
    pub variant: SeriesVariant,
    /// Pen style.
    pub style: LineStyle,
    /// Pen weight.
    pub weight: u32,
    /// Palette index.
    pub color: usize,
    /// Points in drawing order.
    pub points: Vec<Point>,
}

impl PointSeries {
    /// Empty series for a planned variant.
    pub fn new(label: impl Into<String>, planned: &PlannedSeries, color: usize) -> Self {
        Self {
            label: label.into(),
            variant: planned.variant,
            style: planned.style,
            weight: planned.weight,
            color,
            points: Vec::new(),
        }
    }

    /// Append a point.
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push(Point::new(x, y));
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
