use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Pollutant;

/// One row as delivered by a data source, before any validation.
///
/// Every field is optional: CSV exports and API payloads routinely carry
/// blank cells, and the normalizer decides which rows are usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "datetimeLocal", alias = "datetime", alias = "timestamp")]
    pub datetime_local: Option<String>,

    #[serde(alias = "pollutant")]
    pub parameter: Option<String>,

    pub value: Option<String>,

    #[serde(alias = "station_id")]
    pub location_id: Option<String>,

    #[serde(alias = "location", alias = "station_name")]
    pub location_name: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub unit: Option<String>,
}

/// A validated pollutant reading, immutable after normalization.
///
/// `timestamp`, `pollutant`, `value` and `station_name` are guaranteed
/// present; coordinates remain optional since not every station reports
/// a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub pollutant: Pollutant,
    pub value: f64,
    pub station_id: Option<String>,
    pub station_name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub unit: String,
}

impl Observation {
    /// Stable identity used for per-station grouping: the station id when
    /// the feed provides one, the display name otherwise.
    pub fn station_key(&self) -> &str {
        self.station_id.as_deref().unwrap_or(&self.station_name)
    }

    /// Calendar date projection of the timestamp.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour-of-day projection of the timestamp.
    pub fn local_hour(&self) -> u32 {
        use chrono::Timelike;
        self.timestamp.time().hour()
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
