pub mod filename;
pub mod progress;

pub use filename::{generate_default_snapshot_filename, generate_default_staffing_filename};
pub use progress::ProgressReporter;
