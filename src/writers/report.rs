use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::Result;
use crate::models::StationSnapshot;
use crate::processors::{DemandModel, ReferenceStationReport};

/// Writes pipeline output as CSV files: the per-station snapshot table
/// consumed by the map layer, and the one-row staffing report handed to
/// facility management.
pub struct ReportWriter;

#[derive(Serialize)]
struct SnapshotRow<'a> {
    station: &'a str,
    pollutant: &'static str,
    timestamp: String,
    value: f64,
    unit: &'a str,
    tier: &'static str,
    severity_rank: u8,
    color: &'static str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    expected_visits: u32,
}

#[derive(Serialize)]
struct StaffingRow<'a> {
    facility: &'a str,
    station: &'a str,
    pm25: f64,
    tier: &'static str,
    expected_visits: u32,
    base_staff: u32,
    additional_staff: u32,
    total_staff: u32,
    guidance: &'a str,
    generated_at: String,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Export the snapshot table with expected visit counts per station.
    pub fn write_snapshots(
        &self,
        snapshots: &[StationSnapshot],
        demand: &DemandModel,
        path: &Path,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        for snapshot in snapshots {
            let obs = &snapshot.reading.observation;
            writer.serialize(SnapshotRow {
                station: &obs.station_name,
                pollutant: obs.pollutant.code(),
                timestamp: obs.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                value: obs.value,
                unit: &obs.unit,
                tier: snapshot.reading.tier.label(),
                severity_rank: snapshot.reading.severity_rank,
                color: snapshot.reading.color.name(),
                latitude: obs.latitude,
                longitude: obs.longitude,
                expected_visits: demand.estimate(obs.value),
            })?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export the staffing recommendation as a one-row report.
    pub fn write_reference_report(
        &self,
        reference: &ReferenceStationReport,
        facility_name: &str,
        generated_at: NaiveDateTime,
        path: &Path,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.serialize(StaffingRow {
            facility: facility_name,
            station: &reference.station_name,
            pm25: reference.pm25_value,
            tier: reference.tier.label(),
            expected_visits: reference.expected_visits,
            base_staff: reference.staffing.base_staff,
            additional_staff: reference.staffing.additional_staff,
            total_staff: reference.staffing.total_staff,
            guidance: &reference.staffing.guidance,
            generated_at: generated_at.format("%Y-%m-%d %H:%M").to_string(),
        })?;

        writer.flush()?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
