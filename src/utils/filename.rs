use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Default snapshot export path: output/aircesfam-snapshots-{YYMMDD}.csv
pub fn generate_default_snapshot_filename() -> PathBuf {
    dated_output_path("aircesfam-snapshots")
}

/// Default staffing report path: output/aircesfam-staffing-{YYMMDD}.csv
pub fn generate_default_staffing_filename() -> PathBuf {
    dated_output_path("aircesfam-staffing")
}

fn dated_output_path(stem: &str) -> PathBuf {
    let now = Local::now();
    let filename = format!(
        "{}-{:02}{:02}{:02}.csv",
        stem,
        now.year() % 100,
        now.month(),
        now.day()
    );
    PathBuf::from("output").join(filename)
}
