use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use aircesfam_engine::config::EngineConfig;
use aircesfam_engine::models::{Pollutant, RiskTier};
use aircesfam_engine::processors::{classify, DemandModel, Pipeline};
use aircesfam_engine::sources::{CsvFolderSource, ObservationSource, SyntheticSource};
use aircesfam_engine::writers::ReportWriter;

fn write_csv(dir: &Path, name: &str, body: &str) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    write!(file, "{}", body).unwrap();
}

const HEADER: &str = "datetimeLocal,parameter,value,location_name,latitude,longitude,unit\n";

#[tokio::test]
async fn test_csv_folder_round_trip() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "stations.csv",
        &format!(
            "{}\
             2025-08-11 09:00:00,pm25,15,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 10:00:00,pm25,60,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 10:00:00,pm10,120,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 10:00:00,so2,12,Station A,-36.82,-73.05,ppb\n",
            HEADER
        ),
    );

    let rows = CsvFolderSource::new(dir.path()).collect().await.unwrap();
    let report = Pipeline::new(EngineConfig::default()).run(&rows).unwrap();

    // so2 dropped, three readings classified, one pm25 snapshot
    assert_eq!(report.normalizer.unknown_pollutant, 1);
    assert_eq!(report.readings.len(), 3);
    assert_eq!(report.snapshots.len(), 1);

    let snapshot = &report.snapshots[0];
    assert_eq!(snapshot.value(), 60.0);
    assert_eq!(snapshot.reading.tier, RiskTier::Harmful);
    assert_eq!(snapshot.reading.severity_rank, 3);
    assert_eq!(snapshot.reading.color.name(), "red");

    let reference = report.reference.as_ref().unwrap();
    assert_eq!(reference.expected_visits, 77);
    assert_eq!(reference.staffing.total_staff, 8);

    assert_eq!(report.summary.station_count, 1);
    assert_eq!(report.summary.active_alerts.len(), 1);
}

#[tokio::test]
async fn test_malformed_rows_are_filtered_idempotently() {
    let clean_dir = TempDir::new().unwrap();
    write_csv(
        clean_dir.path(),
        "data.csv",
        &format!(
            "{}\
             2025-08-11 09:00:00,pm25,15,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 10:00:00,pm25,60,Station A,-36.82,-73.05,µg/m³\n",
            HEADER
        ),
    );

    let dirty_dir = TempDir::new().unwrap();
    write_csv(
        dirty_dir.path(),
        "data.csv",
        &format!(
            "{}\
             2025-08-11 09:00:00,pm25,15,Station A,-36.82,-73.05,µg/m³\n\
             yesterday at nine,pm25,999,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 10:00:00,pm25,sixty,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 10:00:00,pm25,60,Station A,-36.82,-73.05,µg/m³\n",
            HEADER
        ),
    );

    let pipeline = Pipeline::new(EngineConfig::default());

    let clean_rows = CsvFolderSource::new(clean_dir.path()).collect().await.unwrap();
    let dirty_rows = CsvFolderSource::new(dirty_dir.path()).collect().await.unwrap();

    let clean_report = pipeline.run(&clean_rows).unwrap();
    let dirty_report = pipeline.run(&dirty_rows).unwrap();

    assert_eq!(clean_report.snapshots, dirty_report.snapshots);
    assert_eq!(clean_report.summary, dirty_report.summary);
    assert_eq!(dirty_report.normalizer.unparseable_timestamp, 1);
    assert_eq!(dirty_report.normalizer.non_numeric_value, 1);
}

#[tokio::test]
async fn test_empty_folder_degrades_to_empty_report() {
    let dir = TempDir::new().unwrap();

    let rows = CsvFolderSource::new(dir.path()).collect().await.unwrap();
    let report = Pipeline::new(EngineConfig::default()).run(&rows).unwrap();

    assert!(report.readings.is_empty());
    assert!(report.snapshots.is_empty());
    assert!(report.reference.is_none());
    assert_eq!(report.summary.station_count, 0);
    assert!(report.summary.mean_pm25.is_none());
}

#[tokio::test]
async fn test_out_of_order_duplicate_keeps_latest_snapshot() {
    let dir = TempDir::new().unwrap();
    // The stale 09:00 duplicate arrives last in the feed; the 11:00
    // reading must still win the reduction.
    write_csv(
        dir.path(),
        "data.csv",
        &format!(
            "{}\
             2025-08-11 09:00:00,pm25,15,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 10:00:00,pm25,30,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 11:00:00,pm25,60,Station A,-36.82,-73.05,µg/m³\n\
             2025-08-11 09:00:00,pm25,15,Station A,-36.82,-73.05,µg/m³\n",
            HEADER
        ),
    );

    let rows = CsvFolderSource::new(dir.path()).collect().await.unwrap();
    let report = Pipeline::new(EngineConfig::default()).run(&rows).unwrap();

    assert_eq!(report.snapshots.len(), 1);
    assert_eq!(report.snapshots[0].value(), 60.0);
}

#[tokio::test]
async fn test_demo_source_through_full_pipeline_and_export() {
    let start = NaiveDate::from_ymd_opt(2025, 8, 11)
        .unwrap()
        .and_hms_opt(21, 0, 0)
        .unwrap();

    let rows = SyntheticSource::new(start).collect().await.unwrap();
    let report = Pipeline::new(EngineConfig::default()).run(&rows).unwrap();

    assert_eq!(report.snapshots.len(), 4);
    assert!(report.reference.is_some());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshots.csv");
    ReportWriter::new()
        .write_snapshots(&report.snapshots, &DemandModel::default(), &path)
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    // header + one row per station
    assert_eq!(contents.lines().count(), 5);
    assert!(contents.contains("Concepción"));
}

#[test]
fn test_classifier_contract_over_public_api() {
    assert_eq!(classify(Pollutant::Pm25, 12.0).tier, RiskTier::Good);
    assert_eq!(classify(Pollutant::Pm25, 12.01).tier, RiskTier::Moderate);
    assert_eq!(classify(Pollutant::Pm10, 354.0).tier, RiskTier::Harmful);
    assert_eq!(classify(Pollutant::O3, 200.0).tier, RiskTier::Moderate);
}
