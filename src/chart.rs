pub mod scale;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use service::{Measurement, Series, SeriesId};

pub const DEFAULT_POINT_RADIUS: f32 = 3.0;
pub const HIGHLIGHT_POINT_RADIUS: f32 = 8.0;
pub const HIGHLIGHT_TINT: &str = "#FFD700";

/// Declarative per-series plot description handed to the chart surface.
///
/// `points` and `source` are index-aligned: `points[i]` plots the same
/// measurement `source[i]` carries, which is what lets a point click resolve
/// back to a measurement id.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub series_id: SeriesId,
    pub label: String,
    pub color: String,
    pub points: Vec<(DateTime<Utc>, f64)>,
    pub source: Vec<Measurement>,
    pub highlighted: Option<usize>,
}

impl ChartDataset {
    pub fn point_radius(&self, index: usize) -> f32 {
        if self.highlighted == Some(index) {
            HIGHLIGHT_POINT_RADIUS
        } else {
            DEFAULT_POINT_RADIUS
        }
    }

    pub fn point_color(&self, index: usize) -> &str {
        if self.highlighted == Some(index) {
            HIGHLIGHT_TINT
        } else {
            &self.color
        }
    }
}

/// Everything the chart surface needs for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub datasets: Vec<ChartDataset>,
    pub y_bounds: Option<scale::AxisBounds>,
}

/// Groups measurements into per-series datasets, sorted by timestamp.
///
/// Dataset order follows first appearance of each `series_id` in the input,
/// so legend order is stable run-to-run for the same input. Within a
/// dataset, timestamp ties keep arrival order (stable sort). A measurement
/// whose `series_id` has no matching series is dropped: a dangling reference
/// is not an error at this layer.
pub fn project(
    measurements: &[Measurement],
    series_by_id: &FxHashMap<&str, &Series>,
) -> Vec<ChartDataset> {
    let mut order: Vec<&str> = Vec::new();
    let mut buckets: FxHashMap<&str, Vec<&Measurement>> = FxHashMap::default();

    for m in measurements {
        if !series_by_id.contains_key(m.series_id.as_str()) {
            continue;
        }
        buckets
            .entry(m.series_id.as_str())
            .or_insert_with(|| {
                order.push(m.series_id.as_str());
                Vec::new()
            })
            .push(m);
    }

    order
        .into_iter()
        .map(|series_id| {
            let series = series_by_id[series_id];
            let mut bucket = buckets.remove(series_id).unwrap_or_default();
            bucket.sort_by_key(|m| m.timestamp);

            ChartDataset {
                series_id: series.id.clone(),
                label: series.name.clone(),
                color: series.color.clone(),
                points: bucket.iter().map(|m| (m.timestamp, m.value)).collect(),
                source: bucket.into_iter().cloned().collect(),
                highlighted: None,
            }
        })
        .collect()
}

/// Recomputes the highlight mask from scratch for the given selection.
///
/// Always a full pass over every dataset: the previous selection may belong
/// to a series that is no longer present, so there is nothing incremental to
/// diff against.
pub fn apply_selection(datasets: &mut [ChartDataset], selected: Option<&str>) {
    for dataset in datasets.iter_mut() {
        dataset.highlighted = None;
    }

    let Some(id) = selected else {
        return;
    };

    for dataset in datasets.iter_mut() {
        dataset.highlighted = dataset.source.iter().position(|m| m.id == id);
    }
}
