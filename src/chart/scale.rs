use super::ChartDataset;

const RANGE_PADDING_FACTOR: f64 = 0.1;
// A flat line would otherwise produce a zero-height axis.
const DEGENERATE_PADDING: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

/// Derives Y-axis bounds from the datasets the surface currently shows.
///
/// Callers pass only the visible datasets; a series toggled off in the
/// legend must not stretch the axis. Returns `None` when no visible dataset
/// has a point, leaving auto-scale to the rendering surface default.
pub fn compute_bounds<'a>(
    visible: impl IntoIterator<Item = &'a ChartDataset>,
) -> Option<AxisBounds> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for dataset in visible {
        for &(_, value) in &dataset.points {
            min = min.min(value);
            max = max.max(value);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return None;
    }

    let padding = if max == min {
        DEGENERATE_PADDING
    } else {
        (max - min) * RANGE_PADDING_FACTOR
    };

    Some(AxisBounds {
        min: min - padding,
        max: max + padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn dataset(values: &[f64]) -> ChartDataset {
        ChartDataset {
            series_id: "a".to_string(),
            label: "A".to_string(),
            color: "#FF6B6B".to_string(),
            points: values
                .iter()
                .enumerate()
                .map(|(i, &v)| (t0() + Duration::minutes(i as i64), v))
                .collect(),
            source: Vec::new(),
            highlighted: None,
        }
    }

    #[test]
    fn pads_the_range_by_ten_percent() {
        let datasets = [dataset(&[10.0, 20.0])];
        let bounds = compute_bounds(datasets.iter()).unwrap();

        assert_eq!(bounds.min, 9.0);
        assert_eq!(bounds.max, 21.0);
    }

    #[test]
    fn flat_series_still_gets_a_non_zero_height_axis() {
        let datasets = [dataset(&[5.0, 5.0])];
        let bounds = compute_bounds(datasets.iter()).unwrap();

        assert!(bounds.max > bounds.min);
        assert_eq!(bounds.min, 4.0);
        assert_eq!(bounds.max, 6.0);
    }

    #[test]
    fn no_visible_points_yields_none() {
        assert_eq!(compute_bounds(std::iter::empty()), None);
        let empty = [dataset(&[])];
        assert_eq!(compute_bounds(empty.iter()), None);
    }

    #[test]
    fn bounds_span_all_visible_datasets() {
        let datasets = [dataset(&[10.0, 20.0]), dataset(&[-10.0])];
        let bounds = compute_bounds(datasets.iter()).unwrap();

        assert_eq!(bounds.min, -13.0);
        assert_eq!(bounds.max, 23.0);
    }
}
