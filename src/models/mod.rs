pub mod classified;
pub mod observation;
pub mod pollutant;

pub use classified::{Classification, ClassifiedReading, ColorTag, RiskTier, StationSnapshot};
pub use observation::{Observation, RawObservation};
pub use pollutant::Pollutant;
