//! Graph Catalog Demo Binary
//!
//! Builds the graph catalog for a bridge description, lists the loadings
//! that can be plotted for one interval and action, and plots the first of
//! them against synthetic results.
//!
//! ## Configuration
//!
//! Positional arguments, all optional:
//! 1. Bridge description JSON file (default: built-in spliced girder)
//! 2. Interval number, one-based (default: 9)
//! 3. Action name (default: moment)
//! 4. Analysis mode: simple, continuous or envelope (default: envelope)
//!
//! Environment variables:
//! - `GRAPH_SETTINGS`: path to a settings JSON file
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! LOG_FORMAT=json cargo run --bin graph_catalog -- fixtures/spliced_girder.json 9 shear
//! ```

use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use girder_graph_kernel::{
    ActionKind, AnalysisMode, GirderKey, GraphPlotter, GraphSettings, InMemoryBridge,
    InMemoryResults, IntervalFilter, IntervalIndex, PlotRequest, SharedCatalog, KERNEL_VERSION,
};

const DEMO_BRIDGE: &str = include_str!("../../fixtures/spliced_girder.json");

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "graph_catalog=info,girder_graph_kernel=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!(version = KERNEL_VERSION, "Starting graph catalog demo");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let bridge = match args.first() {
        Some(path) => InMemoryBridge::from_json_str(&std::fs::read_to_string(path)?)?,
        None => InMemoryBridge::from_json_str(DEMO_BRIDGE)?,
    };

    let interval = match args.get(1) {
        Some(n) => n
            .parse::<usize>()?
            .checked_sub(1)
            .map(IntervalIndex)
            .ok_or("interval numbers start at 1")?,
        None => IntervalIndex(8),
    };

    let action = match args.get(2) {
        Some(name) => ActionKind::from_str(name).ok_or_else(|| format!("unknown action: {name}"))?,
        None => ActionKind::Moment,
    };

    let mode = match args.get(3) {
        Some(name) => AnalysisMode::from_str(name).ok_or_else(|| format!("unknown analysis mode: {name}"))?,
        None => AnalysisMode::Envelope,
    };

    let settings = match std::env::var("GRAPH_SETTINGS") {
        Ok(path) => GraphSettings::from_json_str(&std::fs::read_to_string(path)?)?,
        Err(_) => GraphSettings::default(),
    };

    let shared = SharedCatalog::default();
    let catalog = shared.rebuild(&bridge, GirderKey::new(0, 0))?;
    info!(entries = catalog.len(), fingerprint = %catalog.fingerprint()?, "Catalog ready");

    let matches = catalog.query_by_interval_and_action(IntervalFilter::Only(interval), action);
    println!("{action} during {interval}: {} loadings", matches.len());
    for m in &matches {
        println!("  [{:>3}] {}", m.id, m.name);
    }

    let Some(first) = matches.first() else {
        warn!(%interval, %action, "Nothing to plot");
        return Ok(());
    };

    let results = InMemoryResults::synthetic();
    let plotter = GraphPlotter::new(&bridge, &results, &settings);
    let request = PlotRequest::loading(interval, action, mode, vec![first.id]);
    let output = plotter.plot(&request, &catalog)?;

    println!();
    println!("{} ({:?}, {mode})", first.name, output.continuity);
    for series in &output.series {
        let label = if series.label.is_empty() { "-" } else { series.label.as_str() };
        println!(
            "  {label}: {} points, {:?}, color {}",
            series.len(),
            series.variant.submode,
            series.color
        );
    }
    for failure in &output.failures {
        warn!(error = %failure, "Series failed");
    }

    Ok(())
}
