use serde::{Deserialize, Serialize};

use crate::models::{RiskTier, StationSnapshot};
use crate::processors::DemandModel;

/// A station whose current reading sits at or above the alert severity
/// threshold. Carries everything the notification layer needs to compose
/// a message; composing and sending it happens elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAlert {
    pub station_key: String,
    pub station_name: String,
    pub value: f64,
    pub tier: RiskTier,
    pub severity_rank: u8,
}

/// Aggregate view over the current PM2.5 snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub station_count: usize,
    pub mean_pm25: Option<f64>,
    pub mean_expected_visits: Option<u32>,
    pub active_alerts: Vec<ActiveAlert>,
}

impl NetworkSummary {
    pub fn detailed_summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Air Quality Network Summary\n");
        out.push_str("===========================\n");
        out.push_str(&format!("Stations reporting:  {}\n", self.station_count));

        match self.mean_pm25 {
            Some(mean) => out.push_str(&format!("Mean PM2.5:          {:.1} µg/m³\n", mean)),
            None => out.push_str("Mean PM2.5:          no data\n"),
        }

        match self.mean_expected_visits {
            Some(visits) => {
                out.push_str(&format!("Expected visits/day: {}\n", visits));
            }
            None => out.push_str("Expected visits/day: no data\n"),
        }

        if self.active_alerts.is_empty() {
            out.push_str("Active alerts:       none\n");
        } else {
            out.push_str(&format!("Active alerts:       {}\n", self.active_alerts.len()));
            for alert in &self.active_alerts {
                out.push_str(&format!(
                    "  - {}: {:.1} µg/m³ ({})\n",
                    alert.station_name, alert.value, alert.tier
                ));
            }
        }

        out
    }
}

/// Computes the aggregate summary consumed by the dashboard's headline
/// metrics and the notification layer.
pub struct NetworkAnalyzer {
    demand: DemandModel,
    min_alert_rank: u8,
}

impl NetworkAnalyzer {
    pub fn new(demand: DemandModel, min_alert_rank: u8) -> Self {
        Self {
            demand,
            min_alert_rank,
        }
    }

    pub fn summarize(&self, snapshots: &[StationSnapshot]) -> NetworkSummary {
        if snapshots.is_empty() {
            return NetworkSummary {
                station_count: 0,
                mean_pm25: None,
                mean_expected_visits: None,
                active_alerts: Vec::new(),
            };
        }

        let count = snapshots.len();
        let value_sum: f64 = snapshots.iter().map(|s| s.value()).sum();
        let visit_sum: u64 = snapshots
            .iter()
            .map(|s| self.demand.estimate(s.value()) as u64)
            .sum();

        let active_alerts = snapshots
            .iter()
            .filter(|s| s.reading.severity_rank >= self.min_alert_rank)
            .map(|s| ActiveAlert {
                station_key: s.station_key.clone(),
                station_name: s.station_name().to_string(),
                value: s.value(),
                tier: s.reading.tier,
                severity_rank: s.reading.severity_rank,
            })
            .collect();

        NetworkSummary {
            station_count: count,
            mean_pm25: Some(value_sum / count as f64),
            mean_expected_visits: Some((visit_sum as f64 / count as f64) as u32),
            active_alerts,
        }
    }
}
