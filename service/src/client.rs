use crate::{DataService, MeasurementPage, MeasurementQuery, Series, ServiceError};

/// reqwest-backed Data Service client.
///
/// Thin I/O glue: no retries, no caching. Stale-result handling is the
/// dashboard engine's job.
#[derive(Debug, Clone)]
pub struct HttpDataService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDataService {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Data service base URL is empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            client: reqwest::Client::new(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        client: reqwest::Client,
        url: String,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, ServiceError> {
        let response = client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|err| ServiceError::Parse(format!("{url}: {err}")))
    }
}

impl DataService for HttpDataService {
    fn list_series(&self) -> impl Future<Output = Result<Vec<Series>, ServiceError>> + Send {
        let url = format!("{}/api/series", self.base_url);
        let client = self.client.clone();

        async move {
            let series: Vec<Series> = Self::get_json(client, url, Vec::new()).await?;
            log::debug!("fetched {} series", series.len());
            Ok(series)
        }
    }

    fn query_measurements(
        &self,
        query: &MeasurementQuery,
    ) -> impl Future<Output = Result<MeasurementPage, ServiceError>> + Send {
        let url = format!("{}/api/measurement", self.base_url);
        let client = self.client.clone();
        let params = query.to_params();

        async move {
            let page: MeasurementPage = Self::get_json(client, url, params).await?;
            log::debug!(
                "fetched measurement page: {} rows of {}",
                page.content.len(),
                page.total_elements
            );
            Ok(page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let service = HttpDataService::new("http://localhost:8080/").unwrap();
        assert_eq!(service.base_url, "http://localhost:8080");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(matches!(
            HttpDataService::new("/"),
            Err(ServiceError::InvalidRequest(_))
        ));
    }
}
