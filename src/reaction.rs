//! Step rendering of concentrated reactions.
//!
//! A reaction is drawn as a vertical tick: `(x, 0), (x, R), (x, 0)`. Ticks
//! are emitted in ascending X so the baseline between them stays at zero.
//!
//! ## Regimes
//!
//! - Before the first segment is erected each segment sits on its own
//!   temporary supports. The provider reports a left and right reaction per
//!   segment; zero ticks at the start and end faces keep neighbouring
//!   segments from joining into one line.
//! - From erection on, one reaction per support of the girder line, padded
//!   with a zero tick at the girder start and end. A series therefore has
//!   `3 × (supports + 2)` points.

use std::collections::BTreeMap;

use crate::assembler::{series_label, Assembled, SeriesFailure};
use crate::canonical::quantize;
use crate::source::{ReactionRequest, ResultsProvider};
use crate::types::{
    GirderKey, GraphKind, IntervalIndex, LoadSelector, PlannedSeries, PointSeries, ResultsMode,
    SegmentGeometry, SegmentKey, SeriesVariant, Support,
};

/// Points emitted per support.
pub const POINTS_PER_SUPPORT: usize = 3;

/// The reactions being plotted, minus the series variant.
#[derive(Debug, Clone, Copy)]
pub struct ReactionTarget {
    /// Girder being plotted.
    pub girder: GirderKey,
    /// Interval plotted.
    pub interval: IntervalIndex,
    /// Entry kind.
    pub kind: GraphKind,
    /// Entry load selector.
    pub selector: LoadSelector,
    /// Incremental or cumulative.
    pub results_mode: ResultsMode,
}

impl ReactionTarget {
    fn request(&self, variant: SeriesVariant) -> ReactionRequest {
        ReactionRequest {
            girder: self.girder,
            interval: self.interval,
            kind: self.kind,
            selector: self.selector,
            variant,
            results_mode: self.results_mode,
        }
    }
}

/// One segment resting on its own supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSupports {
    /// Segment identity.
    pub key: SegmentKey,
    /// Support geometry during the plotted interval.
    pub geometry: SegmentGeometry,
    /// Plot X of the segment-local origin.
    pub offset: f64,
}

impl SegmentSupports {
    /// Start face, left support, right support, end face.
    fn stations(&self) -> [f64; 4] {
        let g = &self.geometry;
        [
            self.offset + g.start_face,
            self.offset + g.left_support,
            self.offset + g.right_support,
            self.offset + g.end_face,
        ]
    }
}

/// Supports of an erected girder, ordered and deduplicated by X.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportLine {
    supports: Vec<Support>,
    start: f64,
    end: f64,
    offset: f64,
}

impl SupportLine {
    /// Order supports by location.
    ///
    /// Temporary supports can sit between piers in any index order, so the
    /// list is keyed by X. When two supports share a location the first one
    /// listed is kept.
    pub fn new(supports: &[Support], length: f64, offset: f64) -> Self {
        let mut by_x: BTreeMap<i64, Support> = BTreeMap::new();
        for support in supports {
            by_x.entry(quantize(support.x)).or_insert(*support);
        }
        Self {
            supports: by_x.into_values().collect(),
            start: 0.0,
            end: length,
            offset,
        }
    }

    /// Supports in ascending X.
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// Number of real supports.
    pub fn len(&self) -> usize {
        self.supports.len()
    }

    /// True if there are no supports.
    pub fn is_empty(&self) -> bool {
        self.supports.is_empty()
    }
}

/// Emit one reaction tick.
pub fn step(series: &mut PointSeries, x: f64, reaction: f64) {
    series.push(x, 0.0);
    series.push(x, reaction);
    series.push(x, 0.0);
}

/// Builds reaction step series.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionStepBuilder;

impl ReactionStepBuilder {
    /// Segment-based reactions before erection.
    pub fn pre_erection<P: ResultsProvider>(
        provider: &P,
        target: &ReactionTarget,
        segments: &[SegmentSupports],
        planned: &[PlannedSeries],
        label: &str,
        color: usize,
    ) -> Assembled {
        let keys: Vec<SegmentKey> = segments.iter().map(|s| s.key).collect();
        let mut out = Assembled::default();

        for plan in planned {
            let reactions = match provider.segment_reactions(&target.request(plan.variant), &keys) {
                Ok(r) => r,
                Err(e) => {
                    record(&mut out, target, SeriesFailure::from_provider(plan.variant, e));
                    continue;
                }
            };
            if reactions.len() != segments.len() {
                record(
                    &mut out,
                    target,
                    SeriesFailure::LengthMismatch {
                        variant: plan.variant,
                        expected: segments.len(),
                        actual: reactions.len(),
                    },
                );
                continue;
            }

            let mut series = PointSeries::new(series_label(label, plan), plan, color);
            for (segment, reaction) in segments.iter().zip(&reactions) {
                let [start, left, right, end] = segment.stations();
                step(&mut series, start, 0.0);
                step(&mut series, left, reaction.left);
                step(&mut series, right, reaction.right);
                step(&mut series, end, 0.0);
            }
            tracing::debug!(
                interval = %target.interval,
                segments = segments.len(),
                variant = ?plan.variant,
                "Segment reactions assembled"
            );
            out.series.push(series);
        }
        out
    }

    /// Support-based reactions from erection on.
    pub fn post_erection<P: ResultsProvider>(
        provider: &P,
        target: &ReactionTarget,
        line: &SupportLine,
        planned: &[PlannedSeries],
        label: &str,
        color: usize,
    ) -> Assembled {
        let mut out = Assembled::default();

        for plan in planned {
            let reactions = match provider.support_reactions(&target.request(plan.variant), &line.supports) {
                Ok(r) => r,
                Err(e) => {
                    record(&mut out, target, SeriesFailure::from_provider(plan.variant, e));
                    continue;
                }
            };
            if reactions.len() != line.len() {
                record(
                    &mut out,
                    target,
                    SeriesFailure::LengthMismatch {
                        variant: plan.variant,
                        expected: line.len(),
                        actual: reactions.len(),
                    },
                );
                continue;
            }

            let mut series = PointSeries::new(series_label(label, plan), plan, color);
            step(&mut series, line.offset + line.start, 0.0);
            for (support, reaction) in line.supports.iter().zip(reactions) {
                step(&mut series, line.offset + support.x, reaction);
            }
            step(&mut series, line.offset + line.end, 0.0);

            tracing::debug!(
                interval = %target.interval,
                supports = line.len(),
                variant = ?plan.variant,
                "Support reactions assembled"
            );
            out.series.push(series);
        }
        out
    }
}

fn record(out: &mut Assembled, target: &ReactionTarget, failure: SeriesFailure) {
    tracing::warn!(interval = %target.interval, error = %failure, "Reaction series dropped");
    out.failures.push(failure);
}
