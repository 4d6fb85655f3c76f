use rustc_hash::FxHashMap;
use service::{Measurement, Series};

pub const FALLBACK_SERIES_NAME: &str = "Unknown Series";
pub const FALLBACK_SERIES_COLOR: &str = "#4D96FF";

/// One table row: the measurement plus the denormalized series name and
/// color the table renders alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub measurement: Measurement,
    pub series_name: String,
    pub series_color: String,
    pub selected: bool,
}

/// Everything the table surface needs for one render pass. Row order is the
/// server-defined order of the current page, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub total_elements: u64,
    pub page_index: u32,
    pub page_size: u32,
}

pub fn rows(
    measurements: &[Measurement],
    series_by_id: &FxHashMap<&str, &Series>,
    selected: Option<&str>,
) -> Vec<TableRow> {
    measurements
        .iter()
        .map(|m| {
            let series = series_by_id.get(m.series_id.as_str());
            TableRow {
                selected: selected == Some(m.id.as_str()),
                series_name: series
                    .map_or(FALLBACK_SERIES_NAME.to_string(), |s| s.name.clone()),
                series_color: series
                    .map_or(FALLBACK_SERIES_COLOR.to_string(), |s| s.color.clone()),
                measurement: m.clone(),
            }
        })
        .collect()
}
