//! Integration tests: catalog build and plotting against the spliced girder
//! fixture.
//!
//! The fixture is one girder of two 60 ft segments joined by a closure joint
//! at 60.5 ft, on two piers and one erection tower. Key intervals (zero
//! based): hauling 2, first erection 3, closure composite 4, deck composite
//! 6, live load 8.

use girder_graph_kernel::source::memory::GirderRecord;
use girder_graph_kernel::types::{LiveLoadType, ProductLoadType};
use girder_graph_kernel::{
    ActionKind, AnalysisMode, Bound, CatalogError, Continuity, GirderKey, GraphCatalog, GraphId,
    GraphKind, GraphPlotter, GraphSettings, GroupSelection, InMemoryBridge, InMemoryResults,
    IntervalIndex, LoadSelector, PlotError, PlotRequest, RebuildError, ResultsMode,
    SeriesFailure, SharedCatalog, StressLocation,
};

const DEMO_BRIDGE: &str = include_str!("../fixtures/spliced_girder.json");

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn bridge() -> InMemoryBridge {
    InMemoryBridge::from_json_str(DEMO_BRIDGE).unwrap()
}

fn catalog_for(bridge: &InMemoryBridge) -> GraphCatalog {
    girder_graph_kernel::CatalogBuilder::build(bridge, GirderKey::new(0, 0)).unwrap()
}

fn id_named(catalog: &GraphCatalog, name: &str) -> GraphId {
    catalog
        .iter()
        .find(|e| e.name() == name)
        .map(|e| e.id())
        .unwrap_or_else(|| panic!("no entry named {name}"))
}

/// Copy of group 0 placed end to end as group 1.
fn second_group(record: &GirderRecord) -> GirderRecord {
    let key = GirderKey::new(1, 0);
    let mut copy = record.clone();
    copy.key = key;
    copy.group_offset = record.length;
    for segment in &mut copy.segments {
        segment.info.key.girder = key;
    }
    for poi in &mut copy.pois {
        poi.segment.girder = key;
    }
    copy
}

fn xs(series: &girder_graph_kernel::PointSeries) -> Vec<f64> {
    series.points.iter().map(|p| p.x).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// CONTINUITY AND COORDINATES
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hauling_interval_plots_each_segment_in_local_coordinates() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let request = PlotRequest::loading(IntervalIndex(2), ActionKind::Moment, AnalysisMode::SimpleSpan, vec![girder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.continuity, Continuity::SimpleSpan);
    assert_eq!(out.series.len(), 2);
    for series in &out.series {
        assert_eq!(xs(series), vec![0.0, 15.0, 30.0, 45.0, 60.0]);
    }
    assert_eq!(out.series[0].label, "Girder");
    assert_eq!(out.series[1].label, "");
    assert!(out.failures.is_empty());
}

#[test]
fn test_after_closure_plots_whole_girder() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let request = PlotRequest::loading(IntervalIndex(5), ActionKind::Moment, AnalysisMode::Envelope, vec![girder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.continuity, Continuity::Continuous);
    assert_eq!(out.series.len(), 2);
    let min = &out.series[0];
    assert_eq!(min.variant.effective_bound(), Some(Bound::Min));
    assert_eq!(min.len(), 11);
    assert!(xs(min).contains(&60.5));
    assert_eq!(min.points.last().map(|p| p.x), Some(121.0));
    assert_eq!(min.points[0].y, -1.0);
}

#[test]
fn test_deflection_drops_closure_joint_points() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let request = PlotRequest::loading(IntervalIndex(5), ActionKind::Deflection, AnalysisMode::ContinuousSpan, vec![girder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.series.len(), 1);
    assert_eq!(out.series[0].len(), 10);
    assert!(!xs(&out.series[0]).contains(&60.5));
}

#[test]
fn test_pretension_stays_simple_span_in_continuous_batch() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let pretension = id_named(&catalog, "Pretension");
    let request = PlotRequest::loading(
        IntervalIndex(5),
        ActionKind::Moment,
        AnalysisMode::SimpleSpan,
        vec![girder, pretension],
    );
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.continuity, Continuity::Continuous);
    assert_eq!(out.series.len(), 3);
    assert_eq!(out.series[0].len(), 11);
    assert_eq!(out.series[0].color, 0);
    for series in &out.series[1..] {
        assert_eq!(xs(series), vec![0.0, 15.0, 30.0, 45.0, 60.0]);
        assert_eq!(series.color, 1);
    }
    assert_eq!(out.series[1].label, "Pretension");
}

#[test]
fn test_all_groups_shift_by_group_offset() {
    let mut bridge = bridge();
    let group1 = second_group(&bridge.girders[0]);
    bridge.add_girder(group1);
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let request = PlotRequest::loading(IntervalIndex(6), ActionKind::Moment, AnalysisMode::ContinuousSpan, vec![girder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.series.len(), 2);
    assert_eq!(out.series[1].points.first().map(|p| p.x), Some(121.0));
    assert_eq!(out.series[1].points.last().map(|p| p.x), Some(242.0));

    let one = request.clone().with_group(1);
    let out = plotter.plot(&one, &catalog).unwrap();
    assert_eq!(out.series.len(), 1);
    assert_eq!(out.series[0].points.first().map(|p| p.x), Some(0.0));
}

// ─────────────────────────────────────────────────────────────────────────────
// REACTIONS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_pre_erection_reactions_per_segment() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let request = PlotRequest::loading(IntervalIndex(1), ActionKind::Reaction, AnalysisMode::SimpleSpan, vec![girder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.series.len(), 2);
    for series in &out.series {
        assert_eq!(series.len(), 12);
        let ticks: Vec<f64> = series.points.chunks(3).map(|c| c[1].x).collect();
        assert_eq!(ticks, vec![0.0, 0.5, 59.5, 60.0]);
        assert_eq!(series.points.first().map(|p| p.y), Some(0.0));
        assert_eq!(series.points.last().map(|p| p.y), Some(0.0));
    }
}

#[test]
fn test_post_erection_reactions_include_tower() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let request = PlotRequest::loading(IntervalIndex(5), ActionKind::Reaction, AnalysisMode::SimpleSpan, vec![girder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.series.len(), 1);
    let series = &out.series[0];
    assert_eq!(series.len(), 3 * (3 + 2));
    let ticks: Vec<f64> = series.points.chunks(3).map(|c| c[1].x).collect();
    assert_eq!(ticks, vec![0.0, 0.5, 60.5, 120.5, 121.0]);

    let no_towers = GraphSettings {
        include_temporary_supports: false,
        ..GraphSettings::default()
    };
    let plotter = GraphPlotter::new(&bridge, &results, &no_towers);
    let out = plotter.plot(&request, &catalog).unwrap();
    assert_eq!(out.series[0].len(), 3 * (2 + 2));
}

#[test]
fn test_live_load_reactions_min_max_per_girder() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let ll = id_named(&catalog, "LL+IM (Design)");
    let request = PlotRequest::loading(IntervalIndex(8), ActionKind::Reaction, AnalysisMode::ContinuousSpan, vec![ll]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.series.len(), 2);
    assert_eq!(out.series[0].label, "LL+IM (Design) (per girder)");
    assert_eq!(out.series[1].label, "");
    assert_eq!(out.series[0].variant.effective_bound(), Some(Bound::Min));
    assert_eq!(out.series[1].variant.effective_bound(), Some(Bound::Max));
    // Erection towers never carry live load.
    assert_eq!(out.series[0].len(), 3 * (2 + 2));
}

#[test]
fn test_live_load_before_live_load_interval_draws_nothing() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let ll = catalog
        .iter()
        .find(|e| e.kind() == GraphKind::LiveLoad && e.selector() == LoadSelector::LiveLoad(LiveLoadType::Design))
        .map(|e| e.id())
        .unwrap();
    let request = PlotRequest::loading(IntervalIndex(7), ActionKind::Moment, AnalysisMode::Envelope, vec![ll]);
    let out = plotter.plot(&request, &catalog).unwrap();
    assert!(out.series.is_empty());
    assert!(out.failures.is_empty());
}

#[test]
fn test_vehicle_labels_are_per_lane() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let truck = id_named(&catalog, "Design - HL-93 Truck");
    let request = PlotRequest::loading(IntervalIndex(8), ActionKind::Shear, AnalysisMode::Envelope, vec![truck]);
    let out = plotter.plot(&request, &catalog).unwrap();
    assert_eq!(out.series[0].label, "Design - HL-93 Truck (per lane)");
}

// ─────────────────────────────────────────────────────────────────────────────
// LIMIT STATE AND LIVE LOAD STRESS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_limit_state_stress_envelope_draws_min_max_per_fiber() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let service = id_named(&catalog, "Service I (Design)");
    let request = PlotRequest::loading(IntervalIndex(8), ActionKind::Stress, AnalysisMode::Envelope, vec![service])
        .with_stress_locations(vec![StressLocation::TopGirder, StressLocation::BottomGirder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert!(out.failures.is_empty());
    let got: Vec<_> = out
        .series
        .iter()
        .map(|s| (s.label.as_str(), s.variant.stress_location, s.variant.effective_bound()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Service I (Design) - Top Girder", Some(StressLocation::TopGirder), Some(Bound::Min)),
            ("", Some(StressLocation::TopGirder), Some(Bound::Max)),
            ("Service I (Design) - Bottom Girder", Some(StressLocation::BottomGirder), Some(Bound::Min)),
            ("", Some(StressLocation::BottomGirder), Some(Bound::Max)),
        ]
    );
    assert!(out.series.iter().all(|s| s.len() == 11));
    assert!(out.series[0].points.iter().all(|p| p.y < 0.0));
    assert!(out.series[1].points.iter().all(|p| p.y > 0.0));
}

#[test]
fn test_live_load_stress_pairs_in_continuous_mode() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let ll = id_named(&catalog, "LL+IM (Design)");
    let request = PlotRequest::loading(IntervalIndex(8), ActionKind::Stress, AnalysisMode::ContinuousSpan, vec![ll])
        .with_stress_locations(vec![StressLocation::BottomGirder]);
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.series.len(), 2);
    assert_eq!(out.series[0].label, "LL+IM (Design) (per girder) - Bottom Girder");
    assert_eq!(out.series[1].label, "");
    let bounds: Vec<_> = out.series.iter().map(|s| s.variant.effective_bound()).collect();
    assert_eq!(bounds, vec![Some(Bound::Min), Some(Bound::Max)]);
    assert_eq!(out.series[0].style, out.series[1].style);
}

// ─────────────────────────────────────────────────────────────────────────────
// DECK SHRINKAGE
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_deck_shrinkage_zero_outside_window() {
    let mut bridge = bridge();
    bridge.girders[0].features.deck_shrinkage = true;
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let shrinkage = id_named(&catalog, "Deck Shrinkage");
    let incremental = PlotRequest::loading(IntervalIndex(7), ActionKind::Stress, AnalysisMode::ContinuousSpan, vec![shrinkage])
        .with_results_mode(ResultsMode::Incremental);
    let out = plotter.plot(&incremental, &catalog).unwrap();

    let locations: Vec<_> = out.series.iter().filter_map(|s| s.variant.stress_location).collect();
    assert_eq!(locations, vec![StressLocation::TopGirder, StressLocation::BottomGirder]);
    assert!(out.series.iter().all(|s| s.len() == 11 && s.points.iter().all(|p| p.y == 0.0)));
    assert_eq!(out.series[0].label, "Deck Shrinkage - Top Girder");

    let cumulative = incremental.with_results_mode(ResultsMode::Cumulative);
    let out = plotter.plot(&cumulative, &catalog).unwrap();
    assert!(out.series.iter().all(|s| s.points.iter().any(|p| p.y != 0.0)));
}

// ─────────────────────────────────────────────────────────────────────────────
// MODES, FAILURES, REBUILD
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_interval_mode_labels_and_colors() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let request = PlotRequest::intervals(
        vec![IntervalIndex(1), IntervalIndex(2)],
        ActionKind::Moment,
        AnalysisMode::SimpleSpan,
        girder,
    );
    let out = plotter.plot(&request, &catalog).unwrap();

    let labels: Vec<&str> = out.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Interval 2", "", "Interval 3", ""]);
    let colors: Vec<usize> = out.series.iter().map(|s| s.color).collect();
    assert_eq!(colors, vec![1, 1, 2, 2]);
}

#[test]
fn test_provider_failure_isolated_to_its_entry() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let mut results = InMemoryResults::synthetic();
    results.fail_for(LoadSelector::Product(ProductLoadType::Girder));
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let girder = id_named(&catalog, "Girder");
    let diaphragm = id_named(&catalog, "Diaphragm");
    let request = PlotRequest::loading(
        IntervalIndex(5),
        ActionKind::Shear,
        AnalysisMode::Envelope,
        vec![girder, diaphragm],
    );
    let out = plotter.plot(&request, &catalog).unwrap();

    assert_eq!(out.failures.len(), 2);
    assert!(out.failures.iter().all(|f| matches!(f, SeriesFailure::Provider { .. })));
    assert_eq!(out.series.len(), 2);
    assert!(out.series.iter().all(|s| s.color == 2));
}

#[test]
fn test_unknown_selection_fails_plot() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let request = PlotRequest::loading(IntervalIndex(5), ActionKind::Moment, AnalysisMode::Envelope, vec![GraphId(9999)]);
    let err = plotter.plot(&request, &catalog).unwrap_err();
    assert!(matches!(err, PlotError::Catalog(CatalogError::NotFound(GraphId(9999)))));
}

#[test]
fn test_missing_girder_fails_plot() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let request = PlotRequest::loading(IntervalIndex(5), ActionKind::Moment, AnalysisMode::Envelope, vec![GraphId(0)])
        .with_group(3);
    assert!(matches!(plotter.plot(&request, &catalog), Err(PlotError::Metadata(_))));
}

#[test]
fn test_empty_selection_plots_nothing() {
    let bridge = bridge();
    let catalog = catalog_for(&bridge);
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);

    let request = PlotRequest::loading(IntervalIndex(5), ActionKind::Moment, AnalysisMode::Envelope, vec![]);
    let out = plotter.plot(&request, &catalog).unwrap();
    assert!(out.series.is_empty());
}

#[test]
fn test_failed_rebuild_keeps_previous_catalog() {
    let bridge = bridge();
    let shared = SharedCatalog::default();
    let built = shared.rebuild(&bridge, GirderKey::new(0, 0)).unwrap();
    assert!(!built.is_empty());

    let err = shared.rebuild(&bridge, GirderKey::new(4, 0)).unwrap_err();
    assert!(matches!(err, RebuildError::Metadata(_)));
    assert_eq!(shared.snapshot().fingerprint().unwrap(), built.fingerprint().unwrap());
}

#[test]
fn test_group_selection_default_is_all() {
    let request = PlotRequest::loading(IntervalIndex(0), ActionKind::Moment, AnalysisMode::Envelope, vec![]);
    assert_eq!(request.groups, GroupSelection::All);
}
