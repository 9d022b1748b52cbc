use chrono::NaiveDateTime;
use tracing::debug;
use validator::Validate;

use crate::models::{Observation, Pollutant, RawObservation};

/// Accounting of one normalization pass. Dropped rows are never an error,
/// but callers may surface the counts for observability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizerReport {
    pub total_rows: usize,
    pub accepted: usize,
    pub missing_timestamp: usize,
    pub unparseable_timestamp: usize,
    pub missing_value: usize,
    pub non_numeric_value: usize,
    pub negative_value: usize,
    pub unknown_pollutant: usize,
    pub missing_station: usize,
    /// Rows kept with their coordinates cleared because latitude or
    /// longitude was out of range.
    pub cleared_coordinates: usize,
}

impl NormalizerReport {
    pub fn dropped(&self) -> usize {
        self.total_rows - self.accepted
    }

    pub fn summary(&self) -> String {
        format!(
            "Normalized {}/{} rows ({} dropped: {} timestamp, {} value, {} pollutant, {} station)",
            self.accepted,
            self.total_rows,
            self.dropped(),
            self.missing_timestamp + self.unparseable_timestamp,
            self.missing_value + self.non_numeric_value + self.negative_value,
            self.unknown_pollutant,
            self.missing_station,
        )
    }
}

/// Validates and coerces raw rows into canonical observations.
///
/// This stage never fails: rows that cannot be used are dropped and
/// counted, everything else passes through unchanged.
pub struct ObservationNormalizer;

/// Timestamp formats seen across the feeds: RFC 3339 from the API,
/// space- or T-separated local stamps from CSV exports.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

impl ObservationNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, rows: &[RawObservation]) -> (Vec<Observation>, NormalizerReport) {
        let mut report = NormalizerReport {
            total_rows: rows.len(),
            ..Default::default()
        };
        let mut observations = Vec::with_capacity(rows.len());

        for row in rows {
            if let Some(obs) = self.normalize_row(row, &mut report) {
                observations.push(obs);
            }
        }

        report.accepted = observations.len();
        (observations, report)
    }

    fn normalize_row(
        &self,
        row: &RawObservation,
        report: &mut NormalizerReport,
    ) -> Option<Observation> {
        let timestamp = match &row.datetime_local {
            None => {
                report.missing_timestamp += 1;
                return None;
            }
            Some(raw) => match parse_timestamp(raw) {
                Some(ts) => ts,
                None => {
                    debug!(%raw, "dropping row with unparseable timestamp");
                    report.unparseable_timestamp += 1;
                    return None;
                }
            },
        };

        let value = match row.value.as_deref().map(str::trim) {
            None | Some("") => {
                report.missing_value += 1;
                return None;
            }
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    debug!(%raw, "dropping row with non-numeric value");
                    report.non_numeric_value += 1;
                    return None;
                }
            },
        };
        if value < 0.0 {
            report.negative_value += 1;
            return None;
        }

        let pollutant = match row.parameter.as_deref().map(Pollutant::parse) {
            Some(Ok(p)) => p,
            _ => {
                report.unknown_pollutant += 1;
                return None;
            }
        };

        let station_name = match row.location_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                report.missing_station += 1;
                return None;
            }
        };

        let unit = row
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(pollutant.default_unit())
            .to_string();

        let mut observation = Observation {
            timestamp,
            pollutant,
            value,
            station_id: row.location_id.clone().filter(|id| !id.trim().is_empty()),
            station_name,
            latitude: row.latitude,
            longitude: row.longitude,
            unit,
        };

        // Out-of-range coordinates lose the map placement, not the reading.
        if observation.validate().is_err() {
            observation.latitude = None;
            observation.longitude = None;
            report.cleared_coordinates += 1;
        }

        Some(observation)
    }
}

impl Default for ObservationNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    // RFC 3339 stamps (API feeds) are projected to their local clock time;
    // only ordering within a feed is load-bearing downstream.
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in LOCAL_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(datetime: &str, parameter: &str, value: &str, station: &str) -> RawObservation {
        RawObservation {
            datetime_local: Some(datetime.to_string()),
            parameter: Some(parameter.to_string()),
            value: Some(value.to_string()),
            location_id: None,
            location_name: Some(station.to_string()),
            latitude: Some(-36.8270),
            longitude: Some(-73.0503),
            unit: Some("µg/m³".to_string()),
        }
    }

    #[test]
    fn test_accepts_all_timestamp_formats() {
        let normalizer = ObservationNormalizer::new();
        let rows = vec![
            raw_row("2025-08-11 21:00:00", "pm25", "18.5", "Concepción"),
            raw_row("2025-08-11T22:00:00", "pm25", "19.0", "Concepción"),
            raw_row("2025-08-11T23:00:00-04:00", "pm25", "20.1", "Concepción"),
        ];

        let (observations, report) = normalizer.normalize(&rows);
        assert_eq!(observations.len(), 3);
        assert_eq!(report.accepted, 3);
        assert_eq!(report.dropped(), 0);
        assert_eq!(observations[2].local_hour(), 23);
    }

    #[test]
    fn test_drops_unusable_rows() {
        let normalizer = ObservationNormalizer::new();
        let mut no_timestamp = raw_row("", "pm25", "10", "X");
        no_timestamp.datetime_local = None;

        let rows = vec![
            no_timestamp,
            raw_row("not a date", "pm25", "10", "X"),
            raw_row("2025-08-11 21:00:00", "pm25", "n/a", "X"),
            raw_row("2025-08-11 21:00:00", "pm25", "-4.0", "X"),
            raw_row("2025-08-11 21:00:00", "so2", "10", "X"),
            raw_row("2025-08-11 21:00:00", "pm25", "10", ""),
            raw_row("2025-08-11 21:00:00", "pm25", "10", "X"),
        ];

        let (observations, report) = normalizer.normalize(&rows);
        assert_eq!(observations.len(), 1);
        assert_eq!(report.total_rows, 7);
        assert_eq!(report.missing_timestamp, 1);
        assert_eq!(report.unparseable_timestamp, 1);
        assert_eq!(report.non_numeric_value, 1);
        assert_eq!(report.negative_value, 1);
        assert_eq!(report.unknown_pollutant, 1);
        assert_eq!(report.missing_station, 1);
        assert_eq!(report.dropped(), 6);
    }

    #[test]
    fn test_missing_unit_defaults_per_pollutant() {
        let normalizer = ObservationNormalizer::new();
        let mut row = raw_row("2025-08-11 21:00:00", "o3", "14", "Temuco");
        row.unit = None;

        let (observations, _) = normalizer.normalize(&[row]);
        assert_eq!(observations[0].unit, "ppb");
    }

    #[test]
    fn test_bad_coordinates_are_cleared_not_dropped() {
        let normalizer = ObservationNormalizer::new();
        let mut row = raw_row("2025-08-11 21:00:00", "pm25", "30", "Temuco");
        row.latitude = Some(123.0);

        let (observations, report) = normalizer.normalize(&[row]);
        assert_eq!(observations.len(), 1);
        assert!(!observations[0].has_coordinates());
        assert_eq!(report.cleared_coordinates, 1);
    }

    #[test]
    fn test_empty_input() {
        let normalizer = ObservationNormalizer::new();
        let (observations, report) = normalizer.normalize(&[]);
        assert!(observations.is_empty());
        assert_eq!(report.total_rows, 0);
        assert_eq!(report.dropped(), 0);
    }
}
