use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::RawObservation;
use crate::sources::ObservationSource;

/// Reads every `*.csv` file in a folder and concatenates their rows.
///
/// Files are visited in name order so the concatenated feed is
/// deterministic. A file that cannot be opened or parsed is skipped with
/// a warning; individual unreadable records are skipped silently (the
/// normalizer accounts for unusable rows anyway).
pub struct CsvFolderSource {
    folder: PathBuf,
}

impl CsvFolderSource {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    fn csv_files(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.folder)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();

        files.sort();
        Ok(files)
    }

    fn read_file(path: &Path, rows: &mut Vec<RawObservation>) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut count = 0;
        for record in reader.deserialize::<RawObservation>() {
            match record {
                Ok(row) => {
                    rows.push(row);
                    count += 1;
                }
                Err(err) => {
                    debug!(file = %path.display(), %err, "skipping unreadable record");
                }
            }
        }

        Ok(count)
    }
}

#[async_trait]
impl ObservationSource for CsvFolderSource {
    async fn collect(&self) -> Result<Vec<RawObservation>> {
        let files = self.csv_files()?;
        if files.is_empty() {
            warn!(folder = %self.folder.display(), "no CSV files found");
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        for path in &files {
            match Self::read_file(path, &mut rows) {
                Ok(count) => debug!(file = %path.display(), count, "read CSV file"),
                Err(err) => warn!(file = %path.display(), %err, "skipping unreadable CSV file"),
            }
        }

        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("CSV folder {}", self.folder.display())
    }
}
