use seriescope::dashboard::{Action, Dashboard, Message};
use seriescope::logger;
use service::{DataService, HttpDataService};

use std::sync::Arc;
use tokio::sync::mpsc;

const DEFAULT_API_URL: &str = "http://localhost:8080";

fn main() {
    logger::setup(cfg!(debug_assertions)).expect("Failed to initialize logger");

    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map_or_else(
            || "unknown location".to_string(),
            |loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
        );
        let msg = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        log::error!("PANIC at {location}: {msg}");
        eprintln!("PANIC at {location}: {msg}");
    }));

    let api_url =
        std::env::var("SERIESCOPE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let service = match HttpDataService::new(&api_url) {
        Ok(service) => Arc::new(service),
        Err(err) => {
            log::error!("Invalid data service URL {api_url:?}: {err}");
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime");

    runtime.block_on(run(service));
}

/// Headless driver: executes the engine's fetch actions against the HTTP
/// Data Service and feeds completions back in, until the dashboard settles
/// with nothing left in flight. A rendering surface would keep this loop
/// alive and push its interaction events through the same channel.
async fn run(service: Arc<HttpDataService>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut dashboard = Dashboard::new();
    let mut in_flight: usize = 0;

    let _ = tx.send(Message::Initialize);

    while let Some(message) = rx.recv().await {
        if matches!(
            message,
            Message::SeriesFetched { .. } | Message::MeasurementsFetched { .. }
        ) {
            in_flight -= 1;
        }

        for action in dashboard.update(message) {
            in_flight += 1;
            match action {
                Action::FetchSeries { req_id } => {
                    let service = Arc::clone(&service);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = service.list_series().await;
                        let _ = tx.send(Message::SeriesFetched { req_id, result });
                    });
                }
                Action::FetchMeasurements { req_id, query } => {
                    let service = Arc::clone(&service);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = service.query_measurements(&query).await;
                        let _ = tx.send(Message::MeasurementsFetched { req_id, result });
                    });
                }
            }
        }

        if in_flight == 0 {
            break;
        }
    }

    if let Some(err) = dashboard.error() {
        log::error!("load finished with error: {err}");
    }

    let chart = dashboard.chart_view();
    let table = dashboard.table_view();

    log::info!(
        "settled: {} series available, {} selected",
        dashboard.available_series().len(),
        dashboard.filters().series_ids.len()
    );
    for dataset in &chart.datasets {
        log::info!(
            "chart dataset {:?} ({}): {} points",
            dataset.label,
            dataset.color,
            dataset.points.len()
        );
    }
    match chart.y_bounds {
        Some(bounds) => log::info!("y-axis bounds: {:.2}..{:.2}", bounds.min, bounds.max),
        None => log::info!("y-axis bounds: surface default"),
    }
    log::info!(
        "table: {} rows on page {} of size {}, {} total",
        table.rows.len(),
        table.page_index,
        table.page_size,
        table.total_elements
    );
}
