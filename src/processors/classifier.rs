use crate::models::{Classification, ClassifiedReading, ColorTag, Observation, Pollutant, RiskTier};

/// One row of a pollutant breakpoint table: inclusive upper bound plus the
/// tier, rank and marker color assigned below it.
struct Breakpoint {
    upper: f64,
    tier: RiskTier,
    rank: u8,
    color: ColorTag,
}

/// PM2.5 breakpoints in µg/m³, ranked 0 (best) to 5 (worst).
const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint { upper: 12.0, tier: RiskTier::Good, rank: 0, color: ColorTag::Green },
    Breakpoint { upper: 35.0, tier: RiskTier::Moderate, rank: 1, color: ColorTag::Yellow },
    Breakpoint { upper: 55.0, tier: RiskTier::HarmfulSensitive, rank: 2, color: ColorTag::Orange },
    Breakpoint { upper: 150.0, tier: RiskTier::Harmful, rank: 3, color: ColorTag::Red },
    Breakpoint { upper: 250.0, tier: RiskTier::VeryHarmful, rank: 4, color: ColorTag::Purple },
    Breakpoint { upper: f64::INFINITY, tier: RiskTier::Dangerous, rank: 5, color: ColorTag::Maroon },
];

/// PM10 breakpoints in µg/m³. Five tiers only; the open-ended Dangerous
/// entry ranks 4 here.
const PM10_BREAKPOINTS: [Breakpoint; 5] = [
    Breakpoint { upper: 54.0, tier: RiskTier::Good, rank: 0, color: ColorTag::Green },
    Breakpoint { upper: 154.0, tier: RiskTier::Moderate, rank: 1, color: ColorTag::Yellow },
    Breakpoint { upper: 254.0, tier: RiskTier::HarmfulSensitive, rank: 2, color: ColorTag::Orange },
    Breakpoint { upper: 354.0, tier: RiskTier::Harmful, rank: 3, color: ColorTag::Red },
    Breakpoint { upper: f64::INFINITY, tier: RiskTier::Dangerous, rank: 4, color: ColorTag::Purple },
];

fn classify_against(table: &[Breakpoint], value: f64) -> Classification {
    // First inclusive upper bound that holds wins; the last entry is
    // open-ended so the scan always terminates with a match.
    let row = table
        .iter()
        .find(|bp| value <= bp.upper)
        .unwrap_or_else(|| &table[table.len() - 1]);

    Classification {
        tier: row.tier,
        severity_rank: row.rank,
        color: row.color,
    }
}

/// Classify a concentration against its pollutant's risk table.
///
/// Pure and total over `value >= 0`. O3 and NO2 have no dedicated
/// breakpoints in the monitoring network's tables and map to a fixed
/// Moderate/gray tier.
pub fn classify(pollutant: Pollutant, value: f64) -> Classification {
    match pollutant {
        Pollutant::Pm25 => classify_against(&PM25_BREAKPOINTS, value),
        Pollutant::Pm10 => classify_against(&PM10_BREAKPOINTS, value),
        Pollutant::O3 | Pollutant::No2 => Classification {
            tier: RiskTier::Moderate,
            severity_rank: 1,
            color: ColorTag::Gray,
        },
    }
}

/// Public health guidance keyed on the PM2.5 value, over the same
/// breakpoints as `classify`.
///
/// Distinct from the staffing recommendation: this text addresses the
/// general public, not clinic management.
pub fn health_advisory(pm25_value: f64) -> &'static str {
    match classify(Pollutant::Pm25, pm25_value).tier {
        RiskTier::Good => "Air quality is satisfactory; outdoor activity is safe for everyone.",
        RiskTier::Moderate => {
            "Unusually sensitive people should consider limiting prolonged outdoor exertion."
        }
        RiskTier::HarmfulSensitive => {
            "Sensitive groups should avoid outdoor activity; keep indoor air filtered."
        }
        RiskTier::Harmful => {
            "Everyone should avoid physical activity outdoors; wear a mask if going out."
        }
        RiskTier::VeryHarmful => {
            "Remain indoors; avoid vehicle use, smoking and wood-stove heating."
        }
        RiskTier::Dangerous => {
            "Health emergency: stay indoors with filtered air and follow local authority instructions."
        }
    }
}

/// Attach a classification to an observation.
///
/// The public advisory only exists for PM2.5, the pollutant its table is
/// keyed on.
pub fn classify_observation(observation: Observation) -> ClassifiedReading {
    let classification = classify(observation.pollutant, observation.value);
    let advisory = match observation.pollutant {
        Pollutant::Pm25 => Some(health_advisory(observation.value).to_string()),
        _ => None,
    };

    ClassifiedReading {
        observation,
        tier: classification.tier,
        severity_rank: classification.severity_rank,
        color: classification.color,
        advisory,
    }
}
