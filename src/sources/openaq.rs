use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::models::{Pollutant, RawObservation};
use crate::sources::ObservationSource;

const DEFAULT_BASE_URL: &str = "https://api.openaq.org/v3";
const DEFAULT_COUNTRY: &str = "CL";
const DEFAULT_PAGE_LIMIT: u32 = 1000;
const USER_AGENT: &str = concat!("aircesfam-engine/", env!("CARGO_PKG_VERSION"));

/// Pulls recent measurements from the OpenAQ v3 API, one request per
/// accepted pollutant, and flattens them into raw observation rows.
///
/// Retrieval is the only latency-sensitive step of a run; callers wanting
/// a time budget apply it to `collect` via `tokio::time::timeout`.
pub struct OpenAqSource {
    base_url: String,
    country: String,
    api_key: Option<String>,
    page_limit: u32,
    client: reqwest::Client,
}

impl OpenAqSource {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            api_key: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Point the source at a different endpoint (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_parameter(&self, pollutant: Pollutant) -> Result<Vec<RawObservation>> {
        let url = format!("{}/measurements", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("country", self.country.as_str()),
                ("parameter", pollutant.code()),
                ("order_by", "datetime"),
                ("sort", "desc"),
            ])
            .query(&[("limit", self.page_limit)]);

        if let Some(key) = &self.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::ApiStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let payload: MeasurementsResponse = response.json().await?;
        Ok(payload
            .results
            .into_iter()
            .map(ApiMeasurement::into_raw)
            .collect())
    }
}

impl Default for OpenAqSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObservationSource for OpenAqSource {
    async fn collect(&self) -> Result<Vec<RawObservation>> {
        let mut rows = Vec::new();

        for pollutant in Pollutant::all() {
            let batch = self.fetch_parameter(pollutant).await?;
            debug!(pollutant = %pollutant, count = batch.len(), "fetched measurements");
            rows.extend(batch);
        }

        info!(country = %self.country, rows = rows.len(), "OpenAQ fetch complete");
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("OpenAQ v3 measurements for {}", self.country)
    }
}

// ---------------------------------------------------------------------------
// API payload shapes (only the fields the engine consumes)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MeasurementsResponse {
    #[serde(default)]
    results: Vec<ApiMeasurement>,
}

#[derive(Debug, Deserialize)]
struct ApiMeasurement {
    location: Option<ApiLocation>,
    parameter: Option<ApiParameter>,
    value: Option<f64>,
    unit: Option<String>,
    coordinates: Option<ApiCoordinates>,
    date: Option<ApiDate>,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    id: Option<i64>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiParameter {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCoordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiDate {
    utc: Option<String>,
    local: Option<String>,
}

impl ApiMeasurement {
    fn into_raw(self) -> RawObservation {
        let (location_id, location_name) = match self.location {
            Some(location) => (location.id.map(|id| id.to_string()), location.name),
            None => (None, None),
        };
        let (latitude, longitude) = match self.coordinates {
            Some(coordinates) => (coordinates.latitude, coordinates.longitude),
            None => (None, None),
        };

        RawObservation {
            datetime_local: self.date.and_then(|d| d.local.or(d.utc)),
            parameter: self.parameter.and_then(|p| p.name),
            value: self.value.map(|v| v.to_string()),
            location_id,
            location_name,
            latitude,
            longitude,
            unit: self.unit,
        }
    }
}
