use std::collections::HashMap;

use crate::models::{ClassifiedReading, StationSnapshot};

/// Collapse classified readings to one snapshot per station: the reading
/// with the maximal timestamp, ties broken by input order (last occurrence
/// wins).
///
/// The stable sort preserves input order among equal timestamps, so the
/// final map insert per station reproduces the "last record in ordered
/// feed" semantics of the upstream data. Callers normally pass readings
/// for a single pollutant. Empty input yields an empty result.
pub fn latest_by_station(readings: &[ClassifiedReading]) -> Vec<StationSnapshot> {
    let mut ordered: Vec<&ClassifiedReading> = readings.iter().collect();
    ordered.sort_by_key(|r| r.observation.timestamp);

    let mut latest: HashMap<&str, &ClassifiedReading> = HashMap::new();
    for reading in ordered {
        latest.insert(reading.station_key(), reading);
    }

    let mut snapshots: Vec<StationSnapshot> = latest
        .into_iter()
        .map(|(key, reading)| StationSnapshot {
            station_key: key.to_string(),
            reading: reading.clone(),
        })
        .collect();

    // Deterministic presentation order for maps and reports.
    snapshots.sort_by(|a, b| a.station_key.cmp(&b.station_key));
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, Pollutant};
    use crate::processors::classifier;
    use chrono::NaiveDate;

    fn reading(station: &str, value: f64, hour: u32) -> ClassifiedReading {
        let timestamp = NaiveDate::from_ymd_opt(2025, 8, 11)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        let classification = classifier::classify(Pollutant::Pm25, value);

        ClassifiedReading {
            observation: Observation {
                timestamp,
                pollutant: Pollutant::Pm25,
                value,
                station_id: None,
                station_name: station.to_string(),
                latitude: None,
                longitude: None,
                unit: "µg/m³".to_string(),
            },
            tier: classification.tier,
            severity_rank: classification.severity_rank,
            color: classification.color,
            advisory: Some(classifier::health_advisory(value).to_string()),
        }
    }

    #[test]
    fn test_latest_timestamp_wins() {
        let readings = vec![
            reading("Temuco", 15.0, 9),
            reading("Temuco", 60.0, 10),
            reading("Santiago", 8.0, 10),
        ];

        let snapshots = latest_by_station(&readings);
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].station_key, "Santiago");
        assert_eq!(snapshots[1].station_key, "Temuco");
        assert_eq!(snapshots[1].value(), 60.0);
    }

    #[test]
    fn test_out_of_order_duplicate_does_not_displace_latest() {
        // A stale 09:00 duplicate arriving after the 11:00 reading must not
        // win: order after the stable sort decides, not arrival order alone.
        let readings = vec![
            reading("Temuco", 15.0, 9),
            reading("Temuco", 30.0, 10),
            reading("Temuco", 60.0, 11),
            reading("Temuco", 15.0, 9),
        ];

        let snapshots = latest_by_station(&readings);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].value(), 60.0);
    }

    #[test]
    fn test_equal_timestamps_last_occurrence_wins() {
        let readings = vec![
            reading("Temuco", 20.0, 10),
            reading("Temuco", 40.0, 10),
        ];

        let snapshots = latest_by_station(&readings);
        assert_eq!(snapshots[0].value(), 40.0);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(latest_by_station(&[]).is_empty());
    }
}
