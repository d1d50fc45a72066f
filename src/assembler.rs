//! Envelope series assembly.
//!
//! Turns planned series into point sequences: one results request per
//! planned variant, one (x, y) point per point of interest, in POI order.
//!
//! ## Failure Isolation
//!
//! A provider error or a result vector of the wrong length only drops the
//! affected series. The failure is reported in [`Assembled::failures`] and
//! the remaining series of the graph are still assembled.

use crate::config::GraphSettings;
use crate::source::{ResultRequest, ResultsProvider};
use crate::types::{
    ActionKind, Bound, GirderKey, GraphKind, IntervalIndex, LoadSelector, PlannedSeries,
    PointOfInterest, PointSeries, ResultSubmode, ResultsMode, SeriesVariant,
};

/// Why one series was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesFailure {
    /// The provider returned the wrong number of values.
    #[error("Series {variant:?}: expected {expected} values, provider returned {actual}")]
    LengthMismatch {
        /// Variant requested.
        variant: SeriesVariant,
        /// Number of points of interest (or supports).
        expected: usize,
        /// Number of values returned.
        actual: usize,
    },

    /// The provider failed.
    #[error("Series {variant:?}: provider error: {message}")]
    Provider {
        /// Variant requested.
        variant: SeriesVariant,
        /// Provider error message.
        message: String,
    },
}

impl SeriesFailure {
    /// Create from a provider error.
    pub fn from_provider<E: std::error::Error>(variant: SeriesVariant, e: E) -> Self {
        Self::Provider {
            variant,
            message: e.to_string(),
        }
    }
}

/// Precondition violations that stop the whole assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    /// The X list does not line up with the POI list.
    #[error("{pois} points of interest but {xs} X values")]
    Misaligned {
        /// Number of points of interest.
        pois: usize,
        /// Number of X values.
        xs: usize,
    },
}

/// What to assemble: one catalog entry at one interval along one girder.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyRequest<'a> {
    /// Girder being plotted.
    pub girder: GirderKey,
    /// Interval plotted.
    pub interval: IntervalIndex,
    /// Action plotted.
    pub action: ActionKind,
    /// Entry kind.
    pub kind: GraphKind,
    /// Entry load selector.
    pub selector: LoadSelector,
    /// Incremental or cumulative.
    pub results_mode: ResultsMode,
    /// Points of interest, in plotting order.
    pub pois: &'a [PointOfInterest],
    /// Plot X of each point of interest.
    pub xs: &'a [f64],
}

/// Assembled series and the failures encountered on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembled {
    /// Series in planned order, failed ones omitted.
    pub series: Vec<PointSeries>,
    /// Dropped series.
    pub failures: Vec<SeriesFailure>,
}

impl Assembled {
    /// Append another result.
    pub fn extend(&mut self, other: Assembled) {
        self.series.extend(other.series);
        self.failures.extend(other.failures);
    }
}

/// Legend label of a planned series.
///
/// Only primary series are labelled. Stress series add their location
/// suffix. An empty base label stays empty.
pub fn series_label(base: &str, planned: &PlannedSeries) -> String {
    if base.is_empty() || !planned.primary {
        return String::new();
    }
    match planned.variant.stress_location {
        Some(location) => format!("{base}{}", location.label_suffix()),
        None => base.to_string(),
    }
}

/// Builds point series from provider results.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeSeriesAssembler;

impl EnvelopeSeriesAssembler {
    /// Assemble every planned series.
    pub fn assemble<P: ResultsProvider>(
        provider: &P,
        request: &AssemblyRequest<'_>,
        planned: &[PlannedSeries],
        label: &str,
        color: usize,
    ) -> Result<Assembled, AssemblyError> {
        check_alignment(request)?;

        let mut out = Assembled::default();
        for plan in planned {
            let mirrored = is_mirrored(request, plan);
            let variant = if mirrored { mirror_variant(plan.variant) } else { plan.variant };

            let result_request = ResultRequest {
                girder: request.girder,
                interval: request.interval,
                action: request.action,
                kind: request.kind,
                selector: request.selector,
                variant,
                results_mode: request.results_mode,
                pois: request.pois,
            };

            let values = match provider.results(&result_request) {
                Ok(values) => values,
                Err(e) => {
                    let failure = SeriesFailure::from_provider(plan.variant, e);
                    tracing::warn!(interval = %request.interval, action = %request.action, error = %failure, "Series dropped");
                    out.failures.push(failure);
                    continue;
                }
            };

            if values.len() != request.pois.len() {
                let failure = SeriesFailure::LengthMismatch {
                    variant: plan.variant,
                    expected: request.pois.len(),
                    actual: values.len(),
                };
                tracing::warn!(interval = %request.interval, action = %request.action, error = %failure, "Series dropped");
                out.failures.push(failure);
                continue;
            }

            let mut series = PointSeries::new(series_label(label, plan), plan, color);
            let sign = if mirrored { -1.0 } else { 1.0 };
            for (x, y) in request.xs.iter().zip(values) {
                series.push(*x, sign * y);
            }
            tracing::debug!(
                interval = %request.interval,
                action = %request.action,
                variant = ?plan.variant,
                points = series.len(),
                "Series assembled"
            );
            out.series.push(series);
        }
        Ok(out)
    }

    /// A zero at every point of interest for every planned series, without
    /// consulting the provider.
    pub fn assemble_zeros(
        request: &AssemblyRequest<'_>,
        planned: &[PlannedSeries],
        label: &str,
        color: usize,
    ) -> Result<Assembled, AssemblyError> {
        check_alignment(request)?;
        let series = planned
            .iter()
            .map(|plan| {
                let mut series = PointSeries::new(series_label(label, plan), plan, color);
                for x in request.xs {
                    series.push(*x, 0.0);
                }
                series
            })
            .collect();
        Ok(Assembled {
            series,
            failures: Vec::new(),
        })
    }

    /// Near-zero tolerance for axis auto-scaling.
    pub fn zero_tolerance(action: ActionKind, settings: &GraphSettings) -> f64 {
        settings.zero_tolerance(action)
    }
}

fn check_alignment(request: &AssemblyRequest<'_>) -> Result<(), AssemblyError> {
    if request.pois.len() != request.xs.len() {
        return Err(AssemblyError::Misaligned {
            pois: request.pois.len(),
            xs: request.xs.len(),
        });
    }
    Ok(())
}

/// Shear capacity is reported as a positive resistance; the minimum series
/// is its mirror image.
fn is_mirrored(request: &AssemblyRequest<'_>, plan: &PlannedSeries) -> bool {
    request.kind == GraphKind::Capacity
        && request.action == ActionKind::Shear
        && plan.variant.effective_bound() == Some(Bound::Min)
}

fn mirror_variant(variant: SeriesVariant) -> SeriesVariant {
    let submode = match variant.submode {
        ResultSubmode::MinEnvelope => ResultSubmode::MaxEnvelope,
        other => other,
    };
    SeriesVariant {
        submode,
        bound: variant.bound.map(|_| Bound::Max),
        ..variant
    }
}
