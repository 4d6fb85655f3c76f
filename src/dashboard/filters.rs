use chrono::{DateTime, Duration, NaiveTime, Utc};
use service::SeriesId;

/// Named date-window preset computed relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRange {
    SevenDays,
    ThirtyDays,
    Custom,
}

impl QuickRange {
    fn days_back(self) -> Option<i64> {
        match self {
            QuickRange::SevenDays => Some(7),
            QuickRange::ThirtyDays => Some(30),
            QuickRange::Custom => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub series_ids: Vec<SeriesId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub quick_range: Option<QuickRange>,
}

/// Sole owner of the filter selection. Every mutation returns the full
/// snapshot, so a caller always reacts to a consistent state and never reads
/// a field mid-change.
#[derive(Debug)]
pub struct FilterState {
    options: FilterOptions,
}

impl FilterState {
    /// Mount defaults: last 7 days, no series selected yet.
    pub fn new(now: DateTime<Utc>) -> Self {
        let (from, to) = derive_range(7, now);

        Self {
            options: FilterOptions {
                series_ids: Vec::new(),
                date_from: Some(from),
                date_to: Some(to),
                quick_range: Some(QuickRange::SevenDays),
            },
        }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Recomputes the date bounds from `now` for a preset range. Selecting
    /// `Custom` only records the tag; the bounds stay as they are until
    /// [`Self::set_custom_range`] supplies new ones.
    pub fn set_quick_range(&mut self, range: QuickRange, now: DateTime<Utc>) -> FilterOptions {
        if let Some(days) = range.days_back() {
            let (from, to) = derive_range(days, now);
            self.options.date_from = Some(from);
            self.options.date_to = Some(to);
        }
        self.options.quick_range = Some(range);

        self.options.clone()
    }

    /// Stores the given bounds verbatim, `from > to` included; an inverted
    /// range is the Data Service's to answer (with zero rows), not ours to
    /// reject. Editing bounds directly always lands on `Custom`.
    pub fn set_custom_range(
        &mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> FilterOptions {
        self.options.date_from = from;
        self.options.date_to = to;
        self.options.quick_range = Some(QuickRange::Custom);

        self.options.clone()
    }

    /// Idempotent membership toggle.
    pub fn toggle_series(&mut self, id: &str) -> FilterOptions {
        if let Some(pos) = self.options.series_ids.iter().position(|s| s == id) {
            self.options.series_ids.remove(pos);
        } else {
            self.options.series_ids.push(id.to_string());
        }

        self.options.clone()
    }

    /// Bootstrap helper: select every known series, as the filter bar does
    /// right after the series list first loads.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = SeriesId>) -> FilterOptions {
        self.options.series_ids = ids.into_iter().collect();

        self.options.clone()
    }
}

fn derive_range(days_back: i64, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (start_of_day(now - Duration::days(days_back)), end_of_day(now))
}

fn start_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(t) + Duration::days(1) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 30, 45).unwrap()
    }

    #[test]
    fn seven_day_preset_derives_day_aligned_bounds() {
        let mut filters = FilterState::new(noon());
        let snapshot = filters.set_quick_range(QuickRange::SevenDays, noon());

        assert_eq!(
            snapshot.date_from,
            Some(Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap())
        );
        assert_eq!(
            snapshot.date_to,
            Some(
                Utc.with_ymd_and_hms(2024, 5, 15, 23, 59, 59).unwrap()
                    + Duration::milliseconds(999)
            )
        );
        assert_eq!(snapshot.quick_range, Some(QuickRange::SevenDays));
    }

    #[test]
    fn thirty_day_preset_reaches_back_thirty_days() {
        let mut filters = FilterState::new(noon());
        let snapshot = filters.set_quick_range(QuickRange::ThirtyDays, noon());

        assert_eq!(
            snapshot.date_from,
            Some(Utc.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn selecting_custom_preset_keeps_existing_bounds() {
        let mut filters = FilterState::new(noon());
        let before = filters.options().clone();
        let snapshot = filters.set_quick_range(QuickRange::Custom, noon());

        assert_eq!(snapshot.date_from, before.date_from);
        assert_eq!(snapshot.date_to, before.date_to);
        assert_eq!(snapshot.quick_range, Some(QuickRange::Custom));
    }

    #[test]
    fn custom_range_is_stored_verbatim_even_when_inverted() {
        let mut filters = FilterState::new(noon());
        let from = Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        let snapshot = filters.set_custom_range(Some(from), Some(to));

        assert_eq!(snapshot.date_from, Some(from));
        assert_eq!(snapshot.date_to, Some(to));
        assert_eq!(snapshot.quick_range, Some(QuickRange::Custom));
    }

    #[test]
    fn toggle_series_is_an_idempotent_membership_toggle() {
        let mut filters = FilterState::new(noon());

        let snapshot = filters.toggle_series("s1");
        assert_eq!(snapshot.series_ids, vec!["s1".to_string()]);

        filters.toggle_series("s2");
        let snapshot = filters.toggle_series("s1");
        assert_eq!(snapshot.series_ids, vec!["s2".to_string()]);
    }

    #[test]
    fn select_all_replaces_the_selection() {
        let mut filters = FilterState::new(noon());
        filters.toggle_series("stale");

        let snapshot = filters.select_all(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(snapshot.series_ids, vec!["a".to_string(), "b".to_string()]);
    }
}
