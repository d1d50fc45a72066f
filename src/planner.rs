//! Series planning: how many series a graph draws and what each requests.
//!
//! ## Decision Table
//!
//! | action                                            | Envelope                   | Simple / Continuous      |
//! |---------------------------------------------------|----------------------------|--------------------------|
//! | Axial, Shear, Moment, Deflection(X), Rotation, Reaction | [MinEnvelope, MaxEnvelope] | [matching submode]       |
//! | Stress, web stress                                | one per visible location, extreme by location | one per visible location |
//! | LoadRating                                        | [MaxEnvelope]              | [matching submode]       |
//!
//! Bound-pair kinds (limit states, capacities, live loads) always draw a
//! minimum and a maximum for forces, displacements and reactions, also in
//! the non-envelope modes. For stress they draw a minimum and a maximum per
//! visible location, in every mode.
//!
//! The first series of each legend group is primary: the first series of
//! the graph, and for stress the first series of each location.
//!
//! Matching is exhaustive over actions and modes, so there is no
//! unsupported combination at runtime.

use crate::config::GraphSettings;
use crate::types::{
    ActionKind, AnalysisMode, Bound, GraphKind, LineStyle, PlannedSeries, ResultSubmode,
    SeriesVariant, StressLocation,
};

/// Pen weight of ordinary series when no settings are given.
pub const DEFAULT_PEN_WEIGHT: u32 = 2;

/// Line style of shear series.
pub const SHEAR_LINE_STYLE: LineStyle = LineStyle::Dot;

/// Plans the series drawn for one graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesPlanner;

impl SeriesPlanner {
    /// Plan series for an action in an analysis mode.
    ///
    /// `visible` only matters for stress actions; with no visible locations a
    /// stress plot has no series.
    pub fn plan(action: ActionKind, mode: AnalysisMode, visible: &[StressLocation]) -> Vec<PlannedSeries> {
        let variants: Vec<(SeriesVariant, LineStyle)> = match (action, mode) {
            (ActionKind::Shear, AnalysisMode::Envelope) => envelope_pair()
                .into_iter()
                .map(|v| (v, SHEAR_LINE_STYLE))
                .collect(),
            (
                ActionKind::Axial
                | ActionKind::Moment
                | ActionKind::Deflection
                | ActionKind::XDeflection
                | ActionKind::Rotation
                | ActionKind::Reaction,
                AnalysisMode::Envelope,
            ) => envelope_pair().into_iter().map(|v| (v, LineStyle::Solid)).collect(),
            (ActionKind::Shear, AnalysisMode::SimpleSpan | AnalysisMode::ContinuousSpan) => {
                vec![(SeriesVariant::submode(ResultSubmode::for_mode(mode)), SHEAR_LINE_STYLE)]
            }
            (
                ActionKind::Axial
                | ActionKind::Moment
                | ActionKind::Deflection
                | ActionKind::XDeflection
                | ActionKind::Rotation
                | ActionKind::Reaction
                | ActionKind::LoadRating,
                _,
            ) => vec![(SeriesVariant::submode(ResultSubmode::for_mode(mode)), LineStyle::Solid)],
            (ActionKind::Stress | ActionKind::PrincipalWebStress, _) => visible
                .iter()
                .map(|location| {
                    let submode = match mode {
                        AnalysisMode::Envelope => ResultSubmode::envelope(location.envelope_bound()),
                        AnalysisMode::SimpleSpan | AnalysisMode::ContinuousSpan => ResultSubmode::for_mode(mode),
                    };
                    (SeriesVariant::stress(submode, *location), location.line_style())
                })
                .collect(),
        };
        finish(variants, DEFAULT_PEN_WEIGHT)
    }

    /// Plan series for a catalog entry of the given kind.
    ///
    /// Adds the bound pair for bound-pair kinds and picks the pen weight.
    pub fn plan_for_entry(
        kind: GraphKind,
        action: ActionKind,
        mode: AnalysisMode,
        visible: &[StressLocation],
        settings: &GraphSettings,
    ) -> Vec<PlannedSeries> {
        let weight = if kind.is_limit_line() {
            settings.limit_pen_weight
        } else {
            settings.pen_weight
        };

        let visible: Vec<StressLocation> = match kind {
            GraphKind::DeckShrinkage => visible.iter().copied().filter(|l| l.is_girder()).collect(),
            _ => visible.to_vec(),
        };

        let mut planned = Self::plan(action, mode, &visible);
        if kind.is_bound_pair() {
            planned = match (action, mode) {
                (_, AnalysisMode::Envelope) if !action.is_stress() => planned,
                (
                    ActionKind::Axial
                    | ActionKind::Shear
                    | ActionKind::Moment
                    | ActionKind::Deflection
                    | ActionKind::XDeflection
                    | ActionKind::Rotation
                    | ActionKind::Reaction,
                    _,
                ) => planned
                    .iter()
                    .flat_map(|p| {
                        [Bound::Min, Bound::Max].map(|bound| PlannedSeries {
                            variant: SeriesVariant { bound: Some(bound), ..p.variant },
                            ..*p
                        })
                    })
                    .collect(),
                (ActionKind::Stress | ActionKind::PrincipalWebStress, _) => planned
                    .iter()
                    .flat_map(|p| [Bound::Min, Bound::Max].map(|bound| stress_bound(p, mode, bound)))
                    .collect(),
                (ActionKind::LoadRating, _) => planned,
            };
        }

        for p in planned.iter_mut() {
            p.weight = weight;
        }
        mark_primary(&mut planned);
        planned
    }
}

/// One extreme of a stress series. Envelopes select it through the
/// submode, the single-analysis modes through the bound.
fn stress_bound(planned: &PlannedSeries, mode: AnalysisMode, bound: Bound) -> PlannedSeries {
    let variant = match mode {
        AnalysisMode::Envelope => SeriesVariant {
            submode: ResultSubmode::envelope(bound),
            bound: None,
            ..planned.variant
        },
        AnalysisMode::SimpleSpan | AnalysisMode::ContinuousSpan => SeriesVariant {
            bound: Some(bound),
            ..planned.variant
        },
    };
    PlannedSeries { variant, ..*planned }
}

fn mark_primary(planned: &mut [PlannedSeries]) {
    let mut previous = None;
    for (i, p) in planned.iter_mut().enumerate() {
        let location = p.variant.stress_location;
        p.primary = i == 0 || (location.is_some() && location != previous);
        previous = location;
    }
}

fn envelope_pair() -> [SeriesVariant; 2] {
    [
        SeriesVariant::submode(ResultSubmode::MinEnvelope),
        SeriesVariant::submode(ResultSubmode::MaxEnvelope),
    ]
}

fn finish(variants: Vec<(SeriesVariant, LineStyle)>, weight: u32) -> Vec<PlannedSeries> {
    let mut planned: Vec<PlannedSeries> = variants
        .into_iter()
        .map(|(variant, style)| PlannedSeries {
            variant,
            style,
            weight,
            primary: false,
        })
        .collect();
    mark_primary(&mut planned);
    planned
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORCE_LIKE: [ActionKind; 7] = [
        ActionKind::Axial,
        ActionKind::Shear,
        ActionKind::Moment,
        ActionKind::Deflection,
        ActionKind::XDeflection,
        ActionKind::Rotation,
        ActionKind::Reaction,
    ];

    fn submodes(planned: &[PlannedSeries]) -> Vec<ResultSubmode> {
        planned.iter().map(|p| p.variant.submode).collect()
    }

    #[test]
    fn test_envelope_is_min_then_max() {
        for action in FORCE_LIKE {
            let planned = SeriesPlanner::plan(action, AnalysisMode::Envelope, &StressLocation::ALL);
            assert_eq!(
                submodes(&planned),
                vec![ResultSubmode::MinEnvelope, ResultSubmode::MaxEnvelope],
                "{action}"
            );
        }
    }

    #[test]
    fn test_single_mode_is_one_matching_series() {
        for action in FORCE_LIKE {
            let planned = SeriesPlanner::plan(action, AnalysisMode::ContinuousSpan, &[]);
            assert_eq!(submodes(&planned), vec![ResultSubmode::ContinuousSpan]);
            assert!(planned[0].primary);
        }
    }

    #[test]
    fn test_stress_envelope_extremes_by_location() {
        let planned = SeriesPlanner::plan(ActionKind::Stress, AnalysisMode::Envelope, &StressLocation::ALL);
        assert_eq!(
            submodes(&planned),
            vec![
                ResultSubmode::MaxEnvelope,
                ResultSubmode::MinEnvelope,
                ResultSubmode::MinEnvelope,
                ResultSubmode::MinEnvelope,
            ]
        );
        let styles: Vec<_> = planned.iter().map(|p| p.style).collect();
        assert_eq!(styles, vec![LineStyle::Solid, LineStyle::Dash, LineStyle::Dot, LineStyle::DashDot]);
        assert!(planned.iter().all(|p| p.primary));
    }

    #[test]
    fn test_no_visible_locations_no_series() {
        assert!(SeriesPlanner::plan(ActionKind::Stress, AnalysisMode::SimpleSpan, &[]).is_empty());
    }

    #[test]
    fn test_load_rating_single_series() {
        let env = SeriesPlanner::plan(ActionKind::LoadRating, AnalysisMode::Envelope, &[]);
        assert_eq!(submodes(&env), vec![ResultSubmode::MaxEnvelope]);
        let simple = SeriesPlanner::plan(ActionKind::LoadRating, AnalysisMode::SimpleSpan, &[]);
        assert_eq!(submodes(&simple), vec![ResultSubmode::SimpleSpan]);
    }

    #[test]
    fn test_limit_state_reaction_always_two() {
        let settings = GraphSettings::default();
        for mode in [AnalysisMode::SimpleSpan, AnalysisMode::ContinuousSpan, AnalysisMode::Envelope] {
            let planned = SeriesPlanner::plan_for_entry(GraphKind::LimitState, ActionKind::Reaction, mode, &[], &settings);
            let bounds: Vec<_> = planned.iter().map(|p| p.variant.effective_bound()).collect();
            assert_eq!(bounds, vec![Some(Bound::Min), Some(Bound::Max)], "{mode}");
        }
    }

    #[test]
    fn test_product_keeps_single_series() {
        let planned = SeriesPlanner::plan_for_entry(
            GraphKind::Product,
            ActionKind::Moment,
            AnalysisMode::SimpleSpan,
            &[],
            &GraphSettings::default(),
        );
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].variant.bound, None);
    }

    #[test]
    fn test_capacity_uses_limit_weight() {
        let settings = GraphSettings::default();
        let planned = SeriesPlanner::plan_for_entry(
            GraphKind::Capacity,
            ActionKind::Shear,
            AnalysisMode::Envelope,
            &[],
            &settings,
        );
        assert!(planned.iter().all(|p| p.weight == settings.limit_pen_weight));
    }

    #[test]
    fn test_deck_shrinkage_girder_locations_only() {
        let planned = SeriesPlanner::plan_for_entry(
            GraphKind::DeckShrinkage,
            ActionKind::Stress,
            AnalysisMode::SimpleSpan,
            &StressLocation::ALL,
            &GraphSettings::default(),
        );
        let locations: Vec<_> = planned.iter().filter_map(|p| p.variant.stress_location).collect();
        assert_eq!(locations, vec![StressLocation::TopGirder, StressLocation::BottomGirder]);
    }

    #[test]
    fn test_shear_envelope_style_differs_from_force() {
        let shear = SeriesPlanner::plan(ActionKind::Shear, AnalysisMode::Envelope, &[]);
        let moment = SeriesPlanner::plan(ActionKind::Moment, AnalysisMode::Envelope, &[]);
        assert_eq!(submodes(&shear), submodes(&moment));
        assert!(shear.iter().all(|p| p.style == SHEAR_LINE_STYLE));
        assert_ne!(shear[0].style, moment[0].style);
        assert_ne!(shear[1].style, moment[1].style);
    }

    #[test]
    fn test_limit_state_stress_envelope_pairs_per_location() {
        let planned = SeriesPlanner::plan_for_entry(
            GraphKind::LimitState,
            ActionKind::Stress,
            AnalysisMode::Envelope,
            &[StressLocation::TopGirder, StressLocation::BottomGirder],
            &GraphSettings::default(),
        );
        let got: Vec<_> = planned
            .iter()
            .map(|p| (p.variant.stress_location, p.variant.submode, p.primary))
            .collect();
        assert_eq!(
            got,
            vec![
                (Some(StressLocation::TopGirder), ResultSubmode::MinEnvelope, true),
                (Some(StressLocation::TopGirder), ResultSubmode::MaxEnvelope, false),
                (Some(StressLocation::BottomGirder), ResultSubmode::MinEnvelope, true),
                (Some(StressLocation::BottomGirder), ResultSubmode::MaxEnvelope, false),
            ]
        );
        assert_eq!(planned[0].style, planned[1].style);
        assert_ne!(planned[1].style, planned[2].style);
    }

    #[test]
    fn test_allowable_stress_pairs_in_single_mode() {
        let planned = SeriesPlanner::plan_for_entry(
            GraphKind::Allowable,
            ActionKind::Stress,
            AnalysisMode::ContinuousSpan,
            &[StressLocation::TopDeck],
            &GraphSettings::default(),
        );
        let got: Vec<_> = planned.iter().map(|p| (p.variant.submode, p.variant.effective_bound())).collect();
        assert_eq!(
            got,
            vec![
                (ResultSubmode::ContinuousSpan, Some(Bound::Min)),
                (ResultSubmode::ContinuousSpan, Some(Bound::Max)),
            ]
        );
    }

    #[test]
    fn test_product_stress_keeps_one_series_per_location() {
        let planned = SeriesPlanner::plan_for_entry(
            GraphKind::Product,
            ActionKind::Stress,
            AnalysisMode::Envelope,
            &[StressLocation::TopGirder, StressLocation::BottomGirder],
            &GraphSettings::default(),
        );
        assert_eq!(submodes(&planned), vec![ResultSubmode::MaxEnvelope, ResultSubmode::MinEnvelope]);
    }
}
