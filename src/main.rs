// Main entry point - Dependency injection and the chart refresh loop
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::dataset_store::DatasetStore;
use crate::application::fetch_controller::{FetchController, SubmitOutcome};
use crate::domain::projection::Projection;
use crate::domain::summary::DatasetSummary;
use crate::infrastructure::config::{load_charts_config, load_endpoint_config};
use crate::infrastructure::http_source::HttpAggregateSource;
use crate::infrastructure::json_sink::JsonLinesSink;
use crate::presentation::filter_input::parse_filter_fields;
use crate::presentation::plot_binder::PlotBinder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let endpoint_config = load_endpoint_config()?;
    let charts_config = load_charts_config()?;

    // Create the aggregate source (infrastructure layer)
    let source = Arc::new(HttpAggregateSource::new(
        &endpoint_config.endpoint.base_url,
        Duration::from_secs(endpoint_config.endpoint.timeout_secs),
    )?);

    // Create the shared dataset store (application layer)
    let store = Arc::new(DatasetStore::new());

    // Bind one chart per configured target (presentation layer)
    let sink = Arc::new(JsonLinesSink::stdout());
    let binder = PlotBinder::new(store.clone(), sink);
    for chart in &charts_config.charts {
        binder.bind(&chart.target, Projection::metric(chart.metric));
    }

    // Log the summary figures after every refresh
    let summary_store = Arc::downgrade(&store);
    store.subscribe(move || {
        if let Some(store) = summary_store.upgrade() {
            let summary = DatasetSummary::from_rows(&store.current());
            tracing::info!("dataset: {} row(s)", summary.rows);
            for (column, metric) in summary.metrics.iter().enumerate() {
                tracing::info!(
                    "metric {}: min {:.2} / mean {:.2} / max {:.2}",
                    column,
                    metric.min,
                    metric.mean,
                    metric.max
                );
            }
        }
        Ok(())
    });

    tracing::info!("{} refresh subscriber(s) registered", store.subscriber_count());

    // Create the fetch controller and run the first cycle with the
    // configured default filters
    let controller = FetchController::new(source, store);
    let defaults: Vec<(String, String)> = charts_config.filters.clone().into_iter().collect();
    if let Err(err) = controller.submit(&defaults).await {
        tracing::error!("initial fetch failed: {}", err);
    }

    // Every further input line is one filter-form submission
    println!("Enter filters as name=value pairs (empty line clears all filters)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let fields = parse_filter_fields(&line);
        match controller.submit(&fields).await {
            Ok(SubmitOutcome::Installed { rows }) => {
                tracing::info!("charts redrawn from {} row(s)", rows);
            }
            Ok(SubmitOutcome::Superseded) => {}
            Err(err) => tracing::error!("fetch failed: {}", err),
        }
    }

    Ok(())
}
