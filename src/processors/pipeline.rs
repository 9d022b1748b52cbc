use rayon::prelude::*;
use tracing::info;

use crate::analyzers::{NetworkAnalyzer, NetworkSummary};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{ClassifiedReading, Pollutant, RawObservation, StationSnapshot};
use crate::processors::normalizer::{NormalizerReport, ObservationNormalizer};
use crate::processors::staffing::{StaffingPlanner, StaffingRecommendation};
use crate::processors::{classifier, reducer, DemandModel};

/// Demand and staffing outlook for the facility's reference station.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceStationReport {
    pub station_key: String,
    pub station_name: String,
    pub pm25_value: f64,
    pub tier: crate::models::RiskTier,
    pub expected_visits: u32,
    pub staffing: StaffingRecommendation,
}

/// Everything one pipeline pass produces.
///
/// `readings` is the full classified set (trend feed), `snapshots` the
/// per-station current PM2.5 (map feed). `reference` is `None` when no
/// PM2.5 data survived normalization.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub readings: Vec<ClassifiedReading>,
    pub snapshots: Vec<StationSnapshot>,
    pub normalizer: NormalizerReport,
    pub summary: NetworkSummary,
    pub reference: Option<ReferenceStationReport>,
}

/// One-shot pipeline over a raw observation set:
/// normalize -> classify -> reduce -> estimate -> summarize.
///
/// Construct one per invocation with an explicit config; there is no
/// process-wide state. Reductions are recomputed from scratch each run.
pub struct Pipeline {
    config: EngineConfig,
    max_workers: usize,
}

impl Pipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            max_workers: num_cpus::get(),
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn run(&self, rows: &[RawObservation]) -> Result<PipelineReport> {
        let (observations, normalizer_report) = ObservationNormalizer::new().normalize(rows);
        info!("{}", normalizer_report.summary());

        // Classification is an independent map per observation; the indexed
        // parallel collect keeps input order, which the reducer's tie-break
        // depends on.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()?;
        let readings: Vec<ClassifiedReading> = pool.install(|| {
            observations
                .into_par_iter()
                .map(classifier::classify_observation)
                .collect()
        });

        let pm25_readings: Vec<ClassifiedReading> = readings
            .iter()
            .filter(|r| r.observation.pollutant == Pollutant::Pm25)
            .cloned()
            .collect();
        let snapshots = reducer::latest_by_station(&pm25_readings);

        let demand = DemandModel::new(self.config.demand.baseline_visits);
        let summary = NetworkAnalyzer::new(demand, self.config.alerts.min_severity_rank)
            .summarize(&snapshots);

        let reference = self.reference_report(&snapshots, demand)?;

        Ok(PipelineReport {
            readings,
            snapshots,
            normalizer: normalizer_report,
            summary,
            reference,
        })
    }

    /// Pick the station that drives the staffing recommendation: the
    /// configured reference station if set, otherwise the first snapshot
    /// in key order. A configured station missing from the data is an
    /// error; an empty snapshot set is not.
    fn reference_report(
        &self,
        snapshots: &[StationSnapshot],
        demand: DemandModel,
    ) -> Result<Option<ReferenceStationReport>> {
        let snapshot = match &self.config.reference_station {
            Some(wanted) => {
                if snapshots.is_empty() {
                    return Ok(None);
                }
                Some(
                    snapshots
                        .iter()
                        .find(|s| {
                            s.station_key == *wanted || s.station_name() == wanted.as_str()
                        })
                        .ok_or_else(|| EngineError::StationNotFound {
                            station: wanted.clone(),
                        })?,
                )
            }
            None => snapshots.first(),
        };

        Ok(snapshot.map(|snapshot| {
            let pm25_value = snapshot.value();
            let planner = StaffingPlanner::new(self.config.staffing.base_staff);

            ReferenceStationReport {
                station_key: snapshot.station_key.clone(),
                station_name: snapshot.station_name().to_string(),
                pm25_value,
                tier: snapshot.reading.tier,
                expected_visits: demand.estimate(pm25_value),
                staffing: planner.recommend(pm25_value),
            }
        }))
    }
}
