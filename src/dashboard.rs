pub mod cursor;
pub mod filters;
pub mod query;
pub mod selection;
pub mod sync;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use smallvec::{SmallVec, smallvec};
use uuid::Uuid;

use service::{
    MeasurementId, MeasurementPage, MeasurementQuery, Series, SeriesId, ServiceError,
    SortDirection,
};

use crate::chart::{self, ChartView, scale};
use crate::table::{self, TableView};
use cursor::{PageOrigin, PaginationCursor};
use filters::{FilterOptions, FilterState, QuickRange};
use selection::SelectionLink;
use sync::DataSynchronizer;

/// Raw interaction events from the rendering surfaces plus fetch
/// completions from whoever executes [`Action`]s.
#[derive(Debug)]
pub enum Message {
    Initialize,
    QuickRangeSelected(QuickRange),
    CustomRangeSet {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    SeriesToggled(SeriesId),
    SortChanged {
        key: Option<String>,
        direction: Option<SortDirection>,
    },
    PageChanged {
        index: u32,
        size: u32,
        origin: PageOrigin,
    },
    PointOrRowClicked(MeasurementId),
    SelectionCleared,
    VisibleSeriesToggled(SeriesId),
    Refresh,
    SeriesFetched {
        req_id: Uuid,
        result: Result<Vec<Series>, ServiceError>,
    },
    MeasurementsFetched {
        req_id: Uuid,
        result: Result<MeasurementPage, ServiceError>,
    },
}

/// I/O the engine wants performed. The runner (or host application) executes
/// these and feeds the completions back in as messages, tagged with the same
/// request id.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchSeries { req_id: Uuid },
    FetchMeasurements { req_id: Uuid, query: MeasurementQuery },
}

pub type Actions = SmallVec<[Action; 2]>;

/// The linked visualization state engine: one owner per piece of state, one
/// writer method each, cross-component reads only. Both views derive from
/// the same settled measurement result; selecting re-projects without
/// refetching.
pub struct Dashboard {
    filters: FilterState,
    cursor: PaginationCursor,
    sync: DataSynchronizer,
    selection: SelectionLink,
    hidden_series: FxHashSet<SeriesId>,
    bootstrapped: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_now(Utc::now())
    }

    pub fn with_now(now: DateTime<Utc>) -> Self {
        Self {
            filters: FilterState::new(now),
            cursor: PaginationCursor::default(),
            sync: DataSynchronizer::new(),
            selection: SelectionLink::default(),
            hidden_series: FxHashSet::default(),
            bootstrapped: false,
        }
    }

    pub fn update(&mut self, message: Message) -> Actions {
        match message {
            Message::Initialize => {
                let req_id = self.sync.begin_series_refresh();
                smallvec![Action::FetchSeries { req_id }]
            }
            // the dropdown shows Custom only after the bounds were edited
            // directly; nothing has changed yet, so there is nothing to load
            Message::QuickRangeSelected(QuickRange::Custom) => Actions::new(),
            Message::QuickRangeSelected(range) => {
                self.filters.set_quick_range(range, Utc::now());
                self.reload_for_filter_change()
            }
            Message::CustomRangeSet { from, to } => {
                self.filters.set_custom_range(from, to);
                self.reload_for_filter_change()
            }
            Message::SeriesToggled(id) => {
                self.filters.toggle_series(&id);
                self.reload_for_filter_change()
            }
            Message::SortChanged { key, direction } => {
                self.cursor.set_sort(key, direction);
                self.reload()
            }
            Message::PageChanged {
                index,
                size,
                origin,
            } => {
                if self.cursor.set_page(index, size, origin) {
                    self.reload()
                } else {
                    Actions::new()
                }
            }
            Message::PointOrRowClicked(id) => {
                self.selection.select(id);
                Actions::new()
            }
            Message::SelectionCleared => {
                self.selection.clear();
                Actions::new()
            }
            Message::VisibleSeriesToggled(id) => {
                if !self.hidden_series.remove(&id) {
                    self.hidden_series.insert(id);
                }
                Actions::new()
            }
            Message::Refresh => self.reload(),
            Message::SeriesFetched { req_id, result } => {
                self.sync.on_series(req_id, result);

                if !self.bootstrapped && !self.sync.series().is_empty() {
                    // first series list: select everything, like the filter
                    // bar does on mount, and issue the first load
                    self.bootstrapped = true;
                    let all: Vec<SeriesId> =
                        self.sync.series().iter().map(|s| s.id.clone()).collect();
                    self.filters.select_all(all);
                    return self.reload_for_filter_change();
                }

                Actions::new()
            }
            Message::MeasurementsFetched { req_id, result } => {
                self.sync.on_measurements(req_id, result);
                Actions::new()
            }
        }
    }

    fn reload_for_filter_change(&mut self) -> Actions {
        self.cursor.reset_for_new_filter();
        self.reload()
    }

    fn reload(&mut self) -> Actions {
        match query::compose(self.filters.options(), &self.cursor) {
            Some(query) => {
                let req_id = self.sync.begin_load();
                smallvec![
                    Action::FetchSeries { req_id },
                    Action::FetchMeasurements { req_id, query },
                ]
            }
            None => {
                self.sync.apply_empty();
                Actions::new()
            }
        }
    }

    /// Pure derivation for the chart surface: datasets with the current
    /// highlight mask, axis bounds from the visible datasets only. Computed
    /// synchronously from settled state, never deferred.
    pub fn chart_view(&self) -> ChartView {
        let series_by_id = self.sync.series_by_id();
        let mut datasets = chart::project(self.sync.measurements(), &series_by_id);
        chart::apply_selection(&mut datasets, self.selection.selected());

        let y_bounds = scale::compute_bounds(
            datasets
                .iter()
                .filter(|d| !self.hidden_series.contains(&d.series_id)),
        );

        ChartView { datasets, y_bounds }
    }

    /// Pure derivation for the table surface, preserving server row order.
    pub fn table_view(&self) -> TableView {
        let series_by_id = self.sync.series_by_id();

        TableView {
            rows: table::rows(
                self.sync.measurements(),
                &series_by_id,
                self.selection.selected(),
            ),
            total_elements: self.sync.total_elements(),
            page_index: self.cursor.page_index(),
            page_size: self.cursor.page_size(),
        }
    }

    pub fn filters(&self) -> &FilterOptions {
        self.filters.options()
    }

    pub fn available_series(&self) -> &[Series] {
        self.sync.series()
    }

    pub fn selected_measurement_id(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn is_loading(&self) -> bool {
        self.sync.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.sync.error()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
