//! Plot selections, read through a plain accessor interface.
//!
//! Whatever presents the graphs (a GUI, a report generator, a test) exposes
//! its current selections through [`GraphViewModel`]. [`PlotRequest`] is a
//! value implementation that deserializes from JSON.

use serde::{Deserialize, Serialize};

use crate::types::{
    ActionKind, AnalysisMode, GraphId, GroupSelection, IntervalIndex, ResultsMode, StressLocation,
};

/// How selected graphs and intervals combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphMode {
    /// One interval, any number of graphs.
    Loading,
    /// One graph, any number of intervals.
    Interval,
}

impl GraphMode {
    /// Parse a mode name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "loading" => Some(Self::Loading),
            "interval" => Some(Self::Interval),
            _ => None,
        }
    }
}

impl std::fmt::Display for GraphMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Interval => write!(f, "interval"),
        }
    }
}

/// Current plot selections.
pub trait GraphViewModel {
    /// Selected intervals, in selection order.
    fn selected_intervals(&self) -> Vec<IntervalIndex>;

    /// Action plotted.
    fn action(&self) -> ActionKind;

    /// Analysis mode.
    fn analysis_mode(&self) -> AnalysisMode;

    /// Stress fibers shown, in plotting order.
    fn visible_stress_locations(&self) -> Vec<StressLocation>;

    /// Selected catalog entries, in selection order.
    fn selected_graphs(&self) -> Vec<GraphId>;

    /// Loading or interval mode.
    fn graph_mode(&self) -> GraphMode;

    /// Girder index along the girder line.
    fn girder(&self) -> usize;

    /// Groups plotted.
    fn groups(&self) -> GroupSelection;

    /// Results mode, if the presenter offers a choice.
    fn results_mode(&self) -> Option<ResultsMode> {
        None
    }
}

/// Plain-value plot selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    /// Selected intervals.
    pub intervals: Vec<IntervalIndex>,
    /// Action plotted.
    pub action: ActionKind,
    /// Analysis mode.
    pub analysis_mode: AnalysisMode,
    /// Stress fibers shown.
    #[serde(default = "default_stress_locations")]
    pub stress_locations: Vec<StressLocation>,
    /// Selected catalog entries.
    pub graphs: Vec<GraphId>,
    /// Loading or interval mode.
    pub graph_mode: GraphMode,
    /// Girder index.
    #[serde(default)]
    pub girder: usize,
    /// Groups plotted.
    #[serde(default = "default_groups")]
    pub groups: GroupSelection,
    /// Results mode override.
    #[serde(default)]
    pub results_mode: Option<ResultsMode>,
}

fn default_stress_locations() -> Vec<StressLocation> {
    StressLocation::ALL.to_vec()
}

fn default_groups() -> GroupSelection {
    GroupSelection::All
}

impl PlotRequest {
    /// Loading-mode request: one interval, several graphs, first girder of
    /// every group, every stress fiber.
    pub fn loading(interval: IntervalIndex, action: ActionKind, mode: AnalysisMode, graphs: Vec<GraphId>) -> Self {
        Self {
            intervals: vec![interval],
            action,
            analysis_mode: mode,
            stress_locations: default_stress_locations(),
            graphs,
            graph_mode: GraphMode::Loading,
            girder: 0,
            groups: GroupSelection::All,
            results_mode: None,
        }
    }

    /// Interval-mode request: one graph over several intervals.
    pub fn intervals(intervals: Vec<IntervalIndex>, action: ActionKind, mode: AnalysisMode, graph: GraphId) -> Self {
        Self {
            intervals,
            graph_mode: GraphMode::Interval,
            ..Self::loading(IntervalIndex(0), action, mode, vec![graph])
        }
    }

    /// Restrict to one group.
    pub fn with_group(mut self, group: usize) -> Self {
        self.groups = GroupSelection::One(group);
        self
    }

    /// Show only these stress fibers.
    pub fn with_stress_locations(mut self, locations: Vec<StressLocation>) -> Self {
        self.stress_locations = locations;
        self
    }

    /// Override the results mode.
    pub fn with_results_mode(mut self, mode: ResultsMode) -> Self {
        self.results_mode = Some(mode);
        self
    }

    /// Parse from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl GraphViewModel for PlotRequest {
    fn selected_intervals(&self) -> Vec<IntervalIndex> {
        self.intervals.clone()
    }

    fn action(&self) -> ActionKind {
        self.action
    }

    fn analysis_mode(&self) -> AnalysisMode {
        self.analysis_mode
    }

    fn visible_stress_locations(&self) -> Vec<StressLocation> {
        self.stress_locations.clone()
    }

    fn selected_graphs(&self) -> Vec<GraphId> {
        self.graphs.clone()
    }

    fn graph_mode(&self) -> GraphMode {
        self.graph_mode
    }

    fn girder(&self) -> usize {
        self.girder
    }

    fn groups(&self) -> GroupSelection {
        self.groups
    }

    fn results_mode(&self) -> Option<ResultsMode> {
        self.results_mode
    }
}
