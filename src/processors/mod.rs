pub mod classifier;
pub mod demand;
pub mod normalizer;
pub mod pipeline;
pub mod reducer;
pub mod staffing;

pub use classifier::{classify, classify_observation, health_advisory};
pub use demand::DemandModel;
pub use normalizer::{NormalizerReport, ObservationNormalizer};
pub use pipeline::{Pipeline, PipelineReport, ReferenceStationReport};
pub use reducer::latest_by_station;
pub use staffing::{StaffingPlanner, StaffingRecommendation};
