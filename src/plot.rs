//! Plot orchestration.
//!
//! [`GraphPlotter::plot`] reads the selections from a [`GraphViewModel`],
//! resolves the selected catalog entries, and produces every point series
//! of the graph.
//!
//! ## Algorithm
//!
//! 1. Resolve the girder line and classify continuity once for the whole
//!    batch of intervals.
//! 2. For each girder, each (entry, interval) pair and each segment (simple
//!    spans) or the whole girder (continuous):
//!    - skip segments that do not exist yet, are not yet erected while others
//!      are, or are not the one being hauled;
//!    - skip live load entries before live load is applied;
//!    - plan the series and hand them to the reaction builder (reactions) or
//!      the envelope assembler (everything else).
//! 3. Labels are attached once per entry (loading mode) or once per interval
//!    (interval mode); colors come from the entry's ordinal index.
//!
//! Series failures are collected in [`PlotOutput::failures`]. Metadata
//! failures and unknown entries fail the whole plot.

use std::collections::BTreeSet;

use crate::assembler::{AssemblyError, AssemblyRequest, Assembled, EnvelopeSeriesAssembler, SeriesFailure};
use crate::catalog::{CatalogError, GraphCatalog};
use crate::config::GraphSettings;
use crate::continuity::{Continuity, SpanContinuityClassifier};
use crate::planner::SeriesPlanner;
use crate::reaction::{ReactionStepBuilder, ReactionTarget, SegmentSupports, SupportLine};
use crate::source::{BridgeMetadata, ResultsProvider};
use crate::types::{
    ActionKind, AnalysisMode, GirderKey, GraphEntry, GraphId, GraphKind, GroupSelection,
    IntervalIndex, IntervalTimeline, PointOfInterest, PointSeries, ResultsMode, SegmentInfo,
    StressLocation,
};
use crate::view_model::{GraphMode, GraphViewModel};

/// Whole-plot failure.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// A selected entry is not in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Bridge metadata lookup failed.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Inputs to the assembler did not line up.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

impl PlotError {
    /// Create from a metadata error.
    pub fn from_metadata<E: std::error::Error>(e: E) -> Self {
        Self::Metadata(e.to_string())
    }
}

/// Everything drawn on one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutput {
    /// Coordinate system of the batch.
    pub continuity: Continuity,
    /// Series in drawing order.
    pub series: Vec<PointSeries>,
    /// Series that could not be assembled.
    pub failures: Vec<SeriesFailure>,
}

impl PlotOutput {
    fn empty() -> Self {
        Self {
            continuity: Continuity::SimpleSpan,
            series: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// One selected entry at one interval.
#[derive(Debug, Clone, Copy)]
struct WorkItem<'c> {
    entry: &'c GraphEntry,
    ordinal: usize,
    interval: IntervalIndex,
}

/// Interval facts gathered across the plotted girders.
#[derive(Debug, Clone)]
struct BatchTimeline {
    closure_composite: Vec<IntervalIndex>,
    last_composite_deck: IntervalIndex,
    first_erection: IntervalIndex,
    haul_intervals: BTreeSet<IntervalIndex>,
}

impl BatchTimeline {
    fn new(girders: &[(GirderKey, IntervalTimeline, Vec<SegmentInfo>)]) -> Self {
        let mut batch = Self {
            closure_composite: Vec::new(),
            last_composite_deck: IntervalIndex(0),
            first_erection: IntervalIndex(usize::MAX),
            haul_intervals: BTreeSet::new(),
        };
        for (_, timeline, segments) in girders {
            batch.closure_composite.extend(timeline.closure_composite.iter().copied());
            batch.last_composite_deck = batch.last_composite_deck.max(timeline.last_composite_deck);
            batch.first_erection = batch.first_erection.min(timeline.first_segment_erection);
            batch.haul_intervals.extend(segments.iter().map(|s| s.haul));
        }
        batch
    }

    /// Segments with no results at `interval` are not plotted.
    fn skips(&self, interval: IntervalIndex, segment: &SegmentInfo) -> bool {
        let hauling = self.haul_intervals.contains(&interval);
        interval < segment.release
            || (!hauling && self.first_erection <= interval && interval < segment.erection)
            || (hauling && interval != segment.haul)
    }
}

/// Legend labels already handed out.
#[derive(Debug, Default)]
struct LabelBook {
    used: BTreeSet<usize>,
}

impl LabelBook {
    fn label(&mut self, mode: GraphMode, item: &WorkItem<'_>) -> String {
        let (key, text) = match mode {
            GraphMode::Loading => (item.ordinal, item.entry.name().to_string()),
            GraphMode::Interval => (item.interval.index(), format!("Interval {}", item.interval.number())),
        };
        if !self.used.insert(key) {
            return String::new();
        }
        match (mode, item.entry.kind()) {
            (GraphMode::Loading, GraphKind::LiveLoad) => format!("{text} (per girder)"),
            (GraphMode::Loading, GraphKind::VehicularLiveLoad { .. }) => format!("{text} (per lane)"),
            _ => text,
        }
    }
}

/// Produces the series of one graph.
#[derive(Debug)]
pub struct GraphPlotter<'a, M, P> {
    metadata: &'a M,
    provider: &'a P,
    settings: &'a GraphSettings,
}

impl<'a, M: BridgeMetadata, P: ResultsProvider> GraphPlotter<'a, M, P> {
    /// Create a plotter over a bridge and its results.
    pub fn new(metadata: &'a M, provider: &'a P, settings: &'a GraphSettings) -> Self {
        Self {
            metadata,
            provider,
            settings,
        }
    }

    /// Plot the current selections.
    pub fn plot<V: GraphViewModel>(&self, view: &V, catalog: &GraphCatalog) -> Result<PlotOutput, PlotError> {
        let intervals = view.selected_intervals();
        let graph_ids = view.selected_graphs();
        if intervals.is_empty() || graph_ids.is_empty() {
            return Ok(PlotOutput::empty());
        }

        let mode = view.graph_mode();
        let items = work_items(catalog, &graph_ids, &intervals, mode)?;

        let groups = view.groups();
        let keys = self
            .metadata
            .girder_line(view.girder(), groups)
            .map_err(PlotError::from_metadata)?;
        let mut girders = Vec::with_capacity(keys.len());
        for key in keys {
            let timeline = self.metadata.timeline(key).map_err(PlotError::from_metadata)?;
            let segments = self.metadata.segments(key).map_err(PlotError::from_metadata)?;
            girders.push((key, timeline, segments));
        }

        let batch = BatchTimeline::new(&girders);
        let continuity = SpanContinuityClassifier::classify(
            &intervals,
            &batch.closure_composite,
            batch.last_composite_deck,
            groups == GroupSelection::All,
        );
        let results_mode = view.results_mode().unwrap_or(self.settings.results_mode);

        let ctx = PlotContext {
            action: view.action(),
            analysis_mode: view.analysis_mode(),
            visible: view.visible_stress_locations(),
            results_mode,
            mode,
        };

        let mut labels = LabelBook::default();
        let mut out = Assembled::default();
        for (girder, timeline, segments) in &girders {
            let group_offset = match groups {
                GroupSelection::All => self.metadata.group_offset(*girder).map_err(PlotError::from_metadata)?,
                GroupSelection::One(_) => 0.0,
            };
            let girder_ctx = GirderContext {
                key: *girder,
                timeline,
                segments,
                group_offset,
            };
            for item in &items {
                let entry_continuity = SpanContinuityClassifier::for_entry(continuity, item.entry);
                out.extend(self.plot_item(&ctx, &girder_ctx, &batch, item, entry_continuity, &mut labels)?);
            }
        }

        tracing::info!(
            action = %ctx.action,
            continuity = ?continuity,
            series = out.series.len(),
            failures = out.failures.len(),
            "Graph plotted"
        );
        Ok(PlotOutput {
            continuity,
            series: out.series,
            failures: out.failures,
        })
    }

    fn plot_item(
        &self,
        ctx: &PlotContext,
        girder: &GirderContext<'_>,
        batch: &BatchTimeline,
        item: &WorkItem<'_>,
        continuity: Continuity,
        labels: &mut LabelBook,
    ) -> Result<Assembled, PlotError> {
        let entry = item.entry;
        let kind = entry.kind();
        let mut out = Assembled::default();

        if kind.is_live_load() && item.interval < girder.timeline.live_load {
            return Ok(out);
        }

        let planned = SeriesPlanner::plan_for_entry(kind, ctx.action, ctx.analysis_mode, &ctx.visible, self.settings);
        let color = match ctx.mode {
            GraphMode::Loading => item.ordinal,
            GraphMode::Interval => item.ordinal + item.interval.index(),
        };

        if girder.segments.is_empty() {
            return Ok(out);
        }
        let segment_passes: Vec<Option<usize>> = if continuity.is_simple_span() {
            (0..girder.segments.len()).map(Some).collect()
        } else {
            vec![None]
        };

        let mut support_reactions_done = false;
        for pass in segment_passes {
            let segment = &girder.segments[pass.unwrap_or(0)];
            if batch.skips(item.interval, segment) {
                continue;
            }

            if ctx.action == ActionKind::Reaction {
                let pre_erection = !kind.is_live_load() && item.interval < girder.timeline.first_segment_erection;
                if !pre_erection && support_reactions_done {
                    continue;
                }
                let label = labels.label(ctx.mode, item);
                let target = ReactionTarget {
                    girder: girder.key,
                    interval: item.interval,
                    kind,
                    selector: entry.selector(),
                    results_mode: ctx.results_mode,
                };
                if pre_erection {
                    let segments = self.segment_supports(girder, pass, item.interval, continuity)?;
                    out.extend(ReactionStepBuilder::pre_erection(
                        self.provider,
                        &target,
                        &segments,
                        &planned,
                        &label,
                        color,
                    ));
                } else {
                    let include_temporary = !kind.is_live_load() && self.settings.include_temporary_supports;
                    let supports = self
                        .metadata
                        .supports(girder.key, include_temporary)
                        .map_err(PlotError::from_metadata)?;
                    let length = self.metadata.girder_length(girder.key).map_err(PlotError::from_metadata)?;
                    let line = SupportLine::new(&supports, length, girder.group_offset);
                    out.extend(ReactionStepBuilder::post_erection(
                        self.provider,
                        &target,
                        &line,
                        &planned,
                        &label,
                        color,
                    ));
                    support_reactions_done = true;
                }
                continue;
            }

            let pois = self.points_of_interest(girder.key, pass, ctx.action, continuity)?;
            let xs: Vec<f64> = pois.iter().map(|p| continuity.x_value(p, girder.group_offset)).collect();
            let request = AssemblyRequest {
                girder: girder.key,
                interval: item.interval,
                action: ctx.action,
                kind,
                selector: entry.selector(),
                results_mode: ctx.results_mode,
                pois: &pois,
                xs: &xs,
            };
            let label = labels.label(ctx.mode, item);

            let assembled = if kind == GraphKind::DeckShrinkage
                && !deck_shrinkage_applies(item.interval, girder.timeline.last_composite_deck, ctx.results_mode)
            {
                EnvelopeSeriesAssembler::assemble_zeros(&request, &planned, &label, color)?
            } else {
                EnvelopeSeriesAssembler::assemble(self.provider, &request, &planned, &label, color)?
            };
            out.extend(assembled);
        }
        Ok(out)
    }

    fn points_of_interest(
        &self,
        girder: GirderKey,
        segment: Option<usize>,
        action: ActionKind,
        continuity: Continuity,
    ) -> Result<Vec<PointOfInterest>, PlotError> {
        let mut pois = self
            .metadata
            .points_of_interest(girder, segment, action)
            .map_err(PlotError::from_metadata)?;
        // Closure joint points only exist on the continuous girder, and
        // displacements inside them are unreliable.
        if continuity.is_simple_span() || matches!(action, ActionKind::Deflection | ActionKind::Rotation) {
            pois.retain(|p| !p.off_segment);
        }
        Ok(pois)
    }

    fn segment_supports(
        &self,
        girder: &GirderContext<'_>,
        segment: Option<usize>,
        interval: IntervalIndex,
        continuity: Continuity,
    ) -> Result<Vec<SegmentSupports>, PlotError> {
        let selected: Vec<&SegmentInfo> = match segment {
            Some(index) => girder.segments.get(index).into_iter().collect(),
            None => girder.segments.iter().collect(),
        };
        selected
            .into_iter()
            .map(|info| {
                let geometry = self
                    .metadata
                    .segment_geometry(info.key, interval)
                    .map_err(PlotError::from_metadata)?;
                let offset = match continuity {
                    Continuity::SimpleSpan => 0.0,
                    Continuity::Continuous => info.girder_offset + girder.group_offset,
                };
                Ok(SegmentSupports {
                    key: info.key,
                    geometry,
                    offset,
                })
            })
            .collect()
    }
}

/// Selections shared by every series of the plot.
#[derive(Debug, Clone)]
struct PlotContext {
    action: ActionKind,
    analysis_mode: AnalysisMode,
    visible: Vec<StressLocation>,
    results_mode: ResultsMode,
    mode: GraphMode,
}

#[derive(Debug, Clone, Copy)]
struct GirderContext<'g> {
    key: GirderKey,
    timeline: &'g IntervalTimeline,
    segments: &'g [SegmentInfo],
    group_offset: f64,
}

/// Deck shrinkage stresses exist from the interval the deck becomes
/// composite; later intervals only show them cumulatively.
fn deck_shrinkage_applies(interval: IntervalIndex, last_composite_deck: IntervalIndex, mode: ResultsMode) -> bool {
    interval == last_composite_deck || (interval > last_composite_deck && mode == ResultsMode::Cumulative)
}

/// Pair each selected entry with the intervals it is plotted for.
///
/// Loading mode plots every entry at the last selected interval; interval
/// mode plots every entry at every selected interval.
fn work_items<'c>(
    catalog: &'c GraphCatalog,
    graphs: &[GraphId],
    intervals: &[IntervalIndex],
    mode: GraphMode,
) -> Result<Vec<WorkItem<'c>>, PlotError> {
    let mut items = Vec::new();
    for id in graphs {
        let entry = catalog.get_entry(*id)?;
        let ordinal = catalog.ordinal_index(*id)?;
        match mode {
            GraphMode::Loading => {
                if let Some(interval) = intervals.last() {
                    items.push(WorkItem { entry, ordinal, interval: *interval });
                }
            }
            GraphMode::Interval => {
                items.extend(intervals.iter().map(|interval| WorkItem {
                    entry,
                    ordinal,
                    interval: *interval,
                }));
            }
        }
    }
    Ok(items)
}
