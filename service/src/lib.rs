pub mod client;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use client::HttpDataService;

pub type SeriesId = String;
pub type MeasurementId = String;

/// A named, colored stream of scalar measurements. Fetched from the Data
/// Service, never mutated on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: SeriesId,
    pub name: String,
    pub min_value: f64,
    pub max_value: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One timestamped scalar sample belonging to exactly one [`Series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: MeasurementId,
    pub series_id: SeriesId,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of a measurement query result. `content` keeps the server-defined
/// order; the server sends more page metadata than this, but only these two
/// fields are consumed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementPage {
    #[serde(default)]
    pub content: Vec<Measurement>,
    #[serde(default)]
    pub total_elements: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Query shape accepted by the Data Service's measurement endpoint.
///
/// `sort` is the server's `"<field>,<asc|desc>"` convention. Optional fields
/// are omitted from the request entirely when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementQuery {
    pub series_ids: Vec<SeriesId>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl MeasurementQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(self.series_ids.len() + 5);

        for id in &self.series_ids {
            params.push(("seriesIds", id.clone()));
        }
        if let Some(from) = &self.from {
            params.push(("from", from.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(to) = &self.to {
            params.push(("to", to.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }

        params
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// The Data Service consumed by the dashboard engine. Implementations may be
/// slow or fail; callers do not retry.
pub trait DataService {
    fn list_series(&self) -> impl Future<Output = Result<Vec<Series>, ServiceError>> + Send;

    fn query_measurements(
        &self,
        query: &MeasurementQuery,
    ) -> impl Future<Output = Result<MeasurementPage, ServiceError>> + Send;
}
