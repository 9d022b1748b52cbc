use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};

use crate::error::Result;
use crate::models::RawObservation;
use crate::sources::ObservationSource;

/// Demo stations across Chile, with coordinates.
const STATIONS: [(&str, f64, f64); 4] = [
    ("Santiago", -33.45694, -70.66927),
    ("Temuco", -38.9333, -72.65),
    ("Concepción", -36.8187, -73.0573),
    ("Valparaíso", -33.0493, -71.5442),
];

/// Seven hourly values per pollutant, one simulated evening of readings.
/// The feed also carries so2/co rows, which the normalizer filters out,
/// exactly as the real network feeds do.
const SERIES: [(&str, &str, [f64; 7]); 6] = [
    ("pm25", "µg/m³", [79.0, 33.0, 12.0, 13.0, 19.0, 15.0, 5.0]),
    ("pm10", "µg/m³", [80.0, 34.0, 13.0, 14.0, 21.0, 17.0, 5.0]),
    ("o3", "ppb", [13.0, 14.0, 15.0, 14.0, 15.0, 16.0, 16.0]),
    ("no2", "ppb", [0.52, 0.47, 0.87, 0.87, 0.87, 0.87, 0.87]),
    ("so2", "ppb", [12.54, 12.12, 11.74, 11.82, 11.64, 11.93, 11.2]),
    ("co", "ppm", [1.42, 1.01, 0.73, 0.74, 0.74, 0.68, 0.51]),
];

/// Generates a deterministic demo observation set: the fixed series above
/// replayed for each station, shifted a little per station so the map view
/// is not uniform.
pub struct SyntheticSource {
    start: NaiveDateTime,
}

impl SyntheticSource {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { start }
    }

    fn rows(&self) -> Vec<RawObservation> {
        let mut rows = Vec::new();

        for (station_index, (name, latitude, longitude)) in STATIONS.iter().enumerate() {
            // Particulates drift upward a few µg/m³ per station so each
            // marker classifies independently.
            let offset = station_index as f64 * 3.0;

            for (parameter, unit, values) in &SERIES {
                let particulate = matches!(*parameter, "pm25" | "pm10");

                for (hour, base) in values.iter().enumerate() {
                    let timestamp = self.start + Duration::hours(hour as i64);
                    let value = if particulate { base + offset } else { *base };

                    rows.push(RawObservation {
                        datetime_local: Some(timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
                        parameter: Some(parameter.to_string()),
                        value: Some(format!("{}", value)),
                        location_id: None,
                        location_name: Some(name.to_string()),
                        latitude: Some(*latitude),
                        longitude: Some(*longitude),
                        unit: Some(unit.to_string()),
                    });
                }
            }
        }

        rows
    }
}

#[async_trait]
impl ObservationSource for SyntheticSource {
    async fn collect(&self) -> Result<Vec<RawObservation>> {
        Ok(self.rows())
    }

    fn describe(&self) -> String {
        format!("synthetic demo series starting {}", self.start)
    }
}
