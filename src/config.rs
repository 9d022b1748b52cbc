use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Expected daily visits at the care facility under clean-air conditions.
/// An operational estimate for Cesfam La Floresta, overridable per facility.
pub const DEFAULT_BASELINE_VISITS: u32 = 35;

/// Fixed staffing complement: physician, nurse, paramedic technician,
/// administrative, cleaning.
pub const DEFAULT_BASE_STAFF: u32 = 5;

/// Severity rank at and above which a snapshot counts as an active alert
/// (Harmful and worse).
pub const DEFAULT_ALERT_RANK: u8 = 3;

/// Facility name stamped on exported reports.
pub const DEFAULT_FACILITY_NAME: &str = "Cesfam La Floresta";

#[derive(Debug, Clone, Deserialize)]
pub struct DemandConfig {
    pub baseline_visits: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffingConfig {
    pub base_staff: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    pub min_severity_rank: u8,
}

/// Engine tunables, resolved from defaults, an optional TOML file, and
/// `AIRCESFAM__`-prefixed environment variables (in that order).
///
/// The source scripts held these as module-level globals; here a config is
/// built per invocation and handed to the pipeline explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub demand: DemandConfig,
    pub staffing: StaffingConfig,
    pub alerts: AlertConfig,

    /// Station whose PM2.5 snapshot drives the staffing recommendation.
    /// When unset, the first snapshot in key order is used.
    pub reference_station: Option<String>,

    /// Facility name stamped on exported reports.
    pub facility_name: String,
}

impl EngineConfig {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("demand.baseline_visits", DEFAULT_BASELINE_VISITS as i64)?
            .set_default("staffing.base_staff", DEFAULT_BASE_STAFF as i64)?
            .set_default("alerts.min_severity_rank", DEFAULT_ALERT_RANK as i64)?
            .set_default("reference_station", None::<String>)?
            .set_default("facility_name", DEFAULT_FACILITY_NAME)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("AIRCESFAM")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            demand: DemandConfig {
                baseline_visits: DEFAULT_BASELINE_VISITS,
            },
            staffing: StaffingConfig {
                base_staff: DEFAULT_BASE_STAFF,
            },
            alerts: AlertConfig {
                min_severity_rank: DEFAULT_ALERT_RANK,
            },
            reference_station: None,
            facility_name: DEFAULT_FACILITY_NAME.to_string(),
        }
    }
}
