use serde::{Deserialize, Serialize};

use crate::models::Observation;

/// Health-risk tiers, in ascending order of severity.
///
/// The numeric severity rank attached to a reading is table position, not
/// this enum's ordinal: the PM10 table has no VeryHarmful tier, so its
/// Dangerous entry ranks 4 while the PM2.5 one ranks 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Good,
    Moderate,
    HarmfulSensitive,
    Harmful,
    VeryHarmful,
    Dangerous,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Good => "Good",
            RiskTier::Moderate => "Moderate",
            RiskTier::HarmfulSensitive => "Harmful-Sensitive",
            RiskTier::Harmful => "Harmful",
            RiskTier::VeryHarmful => "Very Harmful",
            RiskTier::Dangerous => "Dangerous",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Symbolic marker colors consumed by the map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Maroon,
    Gray,
}

impl ColorTag {
    pub fn name(&self) -> &'static str {
        match self {
            ColorTag::Green => "green",
            ColorTag::Yellow => "yellow",
            ColorTag::Orange => "orange",
            ColorTag::Red => "red",
            ColorTag::Purple => "purple",
            ColorTag::Maroon => "maroon",
            ColorTag::Gray => "gray",
        }
    }
}

/// Output of one classification call: tier, its rank within the pollutant's
/// table, and the marker color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: RiskTier,
    pub severity_rank: u8,
    pub color: ColorTag,
}

/// An observation augmented with its classification.
///
/// The tier is a pure function of (pollutant, value); readings are read-only
/// once produced. `advisory` carries public health guidance and is only
/// populated for PM2.5, the pollutant the advisory table is keyed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReading {
    pub observation: Observation,
    pub tier: RiskTier,
    pub severity_rank: u8,
    pub color: ColorTag,
    pub advisory: Option<String>,
}

impl ClassifiedReading {
    pub fn station_key(&self) -> &str {
        self.observation.station_key()
    }

    pub fn value(&self) -> f64 {
        self.observation.value
    }
}

/// The most recent classified reading for a station/pollutant pair.
///
/// Produced only by the latest-reading reduction, so holding one is the
/// guarantee that no newer reading existed in the reduced set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub station_key: String,
    pub reading: ClassifiedReading,
}

impl StationSnapshot {
    pub fn value(&self) -> f64 {
        self.reading.observation.value
    }

    pub fn station_name(&self) -> &str {
        &self.reading.observation.station_name
    }
}
