pub mod network;

pub use network::{ActiveAlert, NetworkAnalyzer, NetworkSummary};
