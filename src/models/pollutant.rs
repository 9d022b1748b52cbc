use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Pollutant codes accepted by the classification engine.
///
/// Feeds also carry `so2` and `co`, but no risk table is defined for them,
/// so they are filtered out at the normalization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
}

impl Pollutant {
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim().to_lowercase().as_str() {
            "pm25" | "pm2.5" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "o3" => Ok(Pollutant::O3),
            "no2" => Ok(Pollutant::No2),
            other => Err(EngineError::UnknownPollutant(other.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
        }
    }

    /// Default measurement unit reported by the Chilean monitoring feeds.
    pub fn default_unit(&self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "µg/m³",
            Pollutant::O3 | Pollutant::No2 => "ppb",
        }
    }

    pub fn all() -> [Pollutant; 4] {
        [Pollutant::Pm25, Pollutant::Pm10, Pollutant::O3, Pollutant::No2]
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
