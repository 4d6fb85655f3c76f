use service::MeasurementQuery;

use super::cursor::PaginationCursor;
use super::filters::FilterOptions;

/// Composes the measurement query for the current filter selection and
/// cursor. Returns `None` when no series is selected: that is a valid state
/// rendering empty views, and callers must not hit the Data Service for it.
pub fn compose(filters: &FilterOptions, cursor: &PaginationCursor) -> Option<MeasurementQuery> {
    if filters.series_ids.is_empty() {
        return None;
    }

    Some(MeasurementQuery {
        series_ids: filters.series_ids.clone(),
        from: filters.date_from,
        to: filters.date_to,
        page: Some(cursor.page_index()),
        size: Some(cursor.page_size()),
        sort: cursor.sort_param(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::cursor::PageOrigin;
    use crate::dashboard::filters::FilterState;
    use chrono::{TimeZone, Utc};
    use service::SortDirection;

    fn filters_with_series() -> FilterState {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let mut filters = FilterState::new(now);
        filters.toggle_series("s1");
        filters
    }

    #[test]
    fn empty_series_selection_short_circuits() {
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        let filters = FilterState::new(now);

        assert_eq!(compose(filters.options(), &PaginationCursor::default()), None);
    }

    #[test]
    fn query_carries_filter_bounds_and_cursor_position() {
        let filters = filters_with_series();
        let mut cursor = PaginationCursor::default();
        cursor.set_sort(Some("value".to_string()), Some(SortDirection::Desc));
        cursor.set_page(2, 25, PageOrigin::User);

        let query = compose(filters.options(), &cursor).expect("query expected");

        assert_eq!(query.series_ids, vec!["s1".to_string()]);
        assert_eq!(query.from, filters.options().date_from);
        assert_eq!(query.to, filters.options().date_to);
        assert_eq!(query.page, Some(2));
        assert_eq!(query.size, Some(25));
        assert_eq!(query.sort, Some("value,desc".to_string()));
    }

    #[test]
    fn sort_is_omitted_without_a_sort_key() {
        let filters = filters_with_series();

        let query = compose(filters.options(), &PaginationCursor::default()).unwrap();
        assert_eq!(query.sort, None);
    }

    #[test]
    fn dates_pass_through_unset() {
        let mut filters = filters_with_series();
        filters.set_custom_range(None, None);

        let query = compose(filters.options(), &PaginationCursor::default()).unwrap();
        assert_eq!(query.from, None);
        assert_eq!(query.to, None);
    }
}
