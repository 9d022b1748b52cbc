use crate::config::DEFAULT_BASELINE_VISITS;

/// Estimates incremental daily visit demand at the care facility from the
/// current PM2.5 concentration.
///
/// A piecewise multiplier over a baseline visit count; the result is
/// truncated, not rounded. Total over all non-negative inputs and
/// monotonic non-decreasing.
#[derive(Debug, Clone, Copy)]
pub struct DemandModel {
    baseline_visits: u32,
}

impl DemandModel {
    pub fn new(baseline_visits: u32) -> Self {
        Self { baseline_visits }
    }

    pub fn baseline_visits(&self) -> u32 {
        self.baseline_visits
    }

    pub fn estimate(&self, pm25_value: f64) -> u32 {
        (self.baseline_visits as f64 * demand_factor(pm25_value)) as u32
    }
}

impl Default for DemandModel {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_VISITS)
    }
}

fn demand_factor(pm25_value: f64) -> f64 {
    if pm25_value <= 12.0 {
        1.0
    } else if pm25_value <= 35.0 {
        1.3
    } else if pm25_value <= 55.0 {
        1.7
    } else if pm25_value <= 150.0 {
        2.2
    } else {
        2.8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_points() {
        let model = DemandModel::default();
        assert_eq!(model.estimate(0.0), 35);
        assert_eq!(model.estimate(12.0), 35);
        assert_eq!(model.estimate(35.0), 45); // 35 * 1.3 = 45.5, truncated
        assert_eq!(model.estimate(60.0), 77);
        assert_eq!(model.estimate(1000.0), 98);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let model = DemandModel::default();
        let values = [0.0, 12.0, 12.1, 35.0, 36.0, 55.0, 56.0, 150.0, 151.0, 500.0];
        let estimates: Vec<u32> = values.iter().map(|&v| model.estimate(v)).collect();
        assert!(estimates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_custom_baseline() {
        let model = DemandModel::new(50);
        assert_eq!(model.estimate(10.0), 50);
        assert_eq!(model.estimate(40.0), 85); // 50 * 1.7
    }
}
