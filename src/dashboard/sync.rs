use rustc_hash::FxHashMap;
use service::{Measurement, MeasurementPage, Series, SeriesId, ServiceError};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Inflight {
    req_id: Uuid,
    series_pending: bool,
    measurements_pending: bool,
}

/// Owns the fetched data and the lifecycle of the request that produced it.
///
/// Every load carries a request id; a result arriving with any other id
/// belongs to a superseded request and is discarded, so out-of-order network
/// completions can never roll rendered state back to stale data. Loading
/// holds from dispatch until both the series and the measurement leg of the
/// current request have settled, success or failure.
#[derive(Debug, Default)]
pub struct DataSynchronizer {
    inflight: Option<Inflight>,
    series: Vec<Series>,
    series_index: FxHashMap<SeriesId, usize>,
    measurements: Vec<Measurement>,
    total_elements: u64,
    error: Option<String>,
}

impl DataSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a full load: series list and measurements, fetched
    /// concurrently and unordered with respect to each other. Supersedes any
    /// request still in flight.
    pub fn begin_load(&mut self) -> Uuid {
        let req_id = Uuid::new_v4();
        self.inflight = Some(Inflight {
            req_id,
            series_pending: true,
            measurements_pending: true,
        });
        self.error = None;

        req_id
    }

    /// Starts a series-only refresh (used at bootstrap, before any filter
    /// selection exists to query measurements with).
    pub fn begin_series_refresh(&mut self) -> Uuid {
        let req_id = Uuid::new_v4();
        self.inflight = Some(Inflight {
            req_id,
            series_pending: true,
            measurements_pending: false,
        });
        self.error = None;

        req_id
    }

    /// Renders the empty-filter state without touching the Data Service.
    /// Cancels the current request so a late result cannot repopulate views
    /// the user just emptied.
    pub fn apply_empty(&mut self) {
        self.inflight = None;
        self.measurements.clear();
        self.total_elements = 0;
        self.error = None;
    }

    pub fn on_series(&mut self, req_id: Uuid, result: Result<Vec<Series>, ServiceError>) {
        let Some(inflight) = self.inflight.as_mut() else {
            log::debug!("discarding series response for cancelled request {req_id}");
            return;
        };
        if inflight.req_id != req_id {
            log::debug!("discarding stale series response {req_id}");
            return;
        }
        inflight.series_pending = false;

        match result {
            Ok(series) => {
                self.series_index = series
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (s.id.clone(), i))
                    .collect();
                self.series = series;
            }
            Err(err) => {
                log::error!("series fetch failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn on_measurements(&mut self, req_id: Uuid, result: Result<MeasurementPage, ServiceError>) {
        let Some(inflight) = self.inflight.as_mut() else {
            log::debug!("discarding measurement response for cancelled request {req_id}");
            return;
        };
        if inflight.req_id != req_id {
            log::debug!("discarding stale measurement response {req_id}");
            return;
        }
        inflight.measurements_pending = false;

        match result {
            Ok(page) => {
                self.measurements = page.content;
                self.total_elements = page.total_elements;
            }
            Err(err) => {
                // prior data stays in place; no flash-to-empty on failure
                log::error!("measurement fetch failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inflight
            .is_some_and(|i| i.series_pending || i.measurements_pending)
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn series_by_id(&self) -> FxHashMap<&str, &Series> {
        self.series_index
            .iter()
            .map(|(id, &i)| (id.as_str(), &self.series[i]))
            .collect()
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
