use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_BASE_STAFF;

/// Shift staffing advice for the facility, derived from one representative
/// PM2.5 value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRecommendation {
    pub base_staff: u32,
    pub additional_staff: u32,
    pub total_staff: u32,
    pub guidance: String,
}

/// Maps a PM2.5 concentration to an additional-staff count on top of the
/// facility's fixed base complement.
///
/// Pure and total; `additional_staff` is monotonic non-decreasing in the
/// PM2.5 value.
#[derive(Debug, Clone, Copy)]
pub struct StaffingPlanner {
    base_staff: u32,
}

impl StaffingPlanner {
    pub fn new(base_staff: u32) -> Self {
        Self { base_staff }
    }

    pub fn recommend(&self, pm25_value: f64) -> StaffingRecommendation {
        let (additional_staff, guidance) = if pm25_value <= 12.0 {
            (0, "Base staffing sufficient.")
        } else if pm25_value <= 35.0 {
            (1, "Add 1 professional (preferably nursing or paramedic tech).")
        } else if pm25_value <= 55.0 {
            (2, "Assign 2 additional; review respiratory supplies.")
        } else {
            (
                3,
                "Activate contingency plan: 3 additional; review oxygen and medication stock.",
            )
        };

        StaffingRecommendation {
            base_staff: self.base_staff,
            additional_staff,
            total_staff: self.base_staff + additional_staff,
            guidance: guidance.to_string(),
        }
    }
}

impl Default for StaffingPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_STAFF)
    }
}
