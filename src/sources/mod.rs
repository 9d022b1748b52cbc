pub mod csv_folder;
pub mod openaq;
pub mod synthetic;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RawObservation;

/// A provider of raw observation rows.
///
/// The engine does not care whether rows come from a CSV folder, a remote
/// API or a generator; all three feed the same normalization boundary.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn collect(&self) -> Result<Vec<RawObservation>>;

    /// Human-readable description for logs and CLI output.
    fn describe(&self) -> String;
}

pub use csv_folder::CsvFolderSource;
pub use openaq::OpenAqSource;
pub use synthetic::SyntheticSource;
