//! Performance benchmarks for catalog build, queries and plotting.
//!
//! Run with: `cargo bench --bench catalog`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | Catalog build | <1ms | One girder, every feature on |
//! | Interval/action query | <20µs | Linear scan in id order |
//! | Series planning | <1µs | Pure table lookup |
//! | Plot | <5ms p99 | Synthetic results, up to 8 groups |
//! | Snapshot contention | Linear scaling | Readers during rebuilds |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::thread;

use girder_graph_kernel::source::memory::GirderRecord;
use girder_graph_kernel::{
    ActionKind, AnalysisMode, CatalogBuilder, GirderKey, GraphKind, GraphPlotter, GraphSettings,
    InMemoryBridge, InMemoryResults, IntervalFilter, IntervalIndex, PlotRequest, SeriesPlanner,
    SharedCatalog, StressLocation,
};

const DEMO_BRIDGE: &str = include_str!("../fixtures/spliced_girder.json");

/// Demo bridge repeated end to end over `groups` groups.
fn make_bridge(groups: usize) -> InMemoryBridge {
    let demo = InMemoryBridge::from_json_str(DEMO_BRIDGE).unwrap();
    let template = demo.girders[0].clone();
    let mut bridge = InMemoryBridge::new();
    for group in 0..groups {
        bridge.add_girder(shifted(&template, group));
    }
    bridge
}

fn shifted(template: &GirderRecord, group: usize) -> GirderRecord {
    let key = GirderKey::new(group, 0);
    let mut record = template.clone();
    record.key = key;
    record.group_offset = template.length * group as f64;
    for segment in &mut record.segments {
        segment.info.key.girder = key;
    }
    for poi in &mut record.pois {
        poi.segment.girder = key;
    }
    record
}

/// Benchmark catalog population.
fn bench_catalog_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_build");

    for groups in [1, 4, 16] {
        let bridge = make_bridge(groups);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("groups", groups), &bridge, |b, bridge| {
            b.iter(|| CatalogBuilder::build(black_box(bridge), GirderKey::new(0, 0)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark interval/action queries over every interval.
fn bench_query(c: &mut Criterion) {
    let bridge = make_bridge(1);
    let catalog = CatalogBuilder::build(&bridge, GirderKey::new(0, 0)).unwrap();
    let intervals = bridge.girders[0].timeline.interval_count;

    let mut group = c.benchmark_group("query");
    group.throughput(Throughput::Elements(intervals as u64));

    for action in [ActionKind::Moment, ActionKind::Stress, ActionKind::LoadRating] {
        group.bench_with_input(BenchmarkId::new("action", action), &action, |b, &action| {
            b.iter(|| {
                (0..intervals)
                    .map(|i| {
                        catalog
                            .query_by_interval_and_action(IntervalFilter::Only(IntervalIndex(i)), black_box(action))
                            .len()
                    })
                    .sum::<usize>()
            })
        });
    }

    group.bench_function("any_interval", |b| {
        b.iter(|| catalog.first_id_for(IntervalFilter::Any, black_box(ActionKind::Moment)))
    });

    group.finish();
}

/// Benchmark series planning.
fn bench_planning(c: &mut Criterion) {
    let settings = GraphSettings::default();

    c.bench_function("plan_stress_envelope", |b| {
        b.iter(|| {
            SeriesPlanner::plan_for_entry(
                black_box(GraphKind::LimitState),
                ActionKind::Stress,
                AnalysisMode::Envelope,
                &StressLocation::ALL,
                &settings,
            )
        })
    });

    c.bench_function("plan_reaction_bound_pair", |b| {
        b.iter(|| {
            SeriesPlanner::plan_for_entry(
                black_box(GraphKind::LiveLoad),
                ActionKind::Reaction,
                AnalysisMode::ContinuousSpan,
                &[],
                &settings,
            )
        })
    });
}

/// Benchmark a full plot against synthetic results.
fn bench_plot(c: &mut Criterion) {
    let settings = GraphSettings::default();
    let results = InMemoryResults::synthetic();

    let mut group = c.benchmark_group("plot");

    for groups in [1, 2, 8] {
        let bridge = make_bridge(groups);
        let catalog = CatalogBuilder::build(&bridge, GirderKey::new(0, 0)).unwrap();
        let graphs: Vec<_> = catalog
            .query_by_interval_and_action(IntervalFilter::Only(IntervalIndex(8)), ActionKind::Moment)
            .into_iter()
            .map(|m| m.id)
            .collect();
        let request = PlotRequest::loading(IntervalIndex(8), ActionKind::Moment, AnalysisMode::Envelope, graphs);
        let plotter = GraphPlotter::new(&bridge, &results, &settings);

        group.throughput(Throughput::Elements(groups as u64));
        group.bench_with_input(BenchmarkId::new("groups", groups), &request, |b, request| {
            b.iter(|| {
                let out = plotter.plot(black_box(request), &catalog).unwrap();
                assert!(out.failures.is_empty());
                out
            })
        });
    }

    group.finish();
}

/// Benchmark snapshot reads while the catalog is rebuilt.
fn bench_snapshot_contention(c: &mut Criterion) {
    let bridge = make_bridge(1);
    let shared = SharedCatalog::default();
    shared.rebuild(&bridge, GirderKey::new(0, 0)).unwrap();

    let mut group = c.benchmark_group("snapshot_contention");

    for num_threads in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(num_threads as u64));
        group.bench_with_input(BenchmarkId::new("threads", num_threads), &num_threads, |b, &n| {
            b.iter(|| {
                thread::scope(|s| {
                    for _ in 0..n {
                        let shared = shared.clone();
                        s.spawn(move || {
                            for _ in 0..100 {
                                let catalog = shared.snapshot();
                                black_box(catalog.first_id_for(IntervalFilter::Any, ActionKind::Shear));
                            }
                        });
                    }
                    shared.rebuild(&bridge, GirderKey::new(0, 0)).unwrap();
                })
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_catalog_build,
    bench_query,
    bench_planning,
    bench_plot,
    bench_snapshot_contention,
);
criterion_main!(benches);
