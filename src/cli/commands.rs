use std::path::PathBuf;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::processors::{DemandModel, ObservationNormalizer, Pipeline, PipelineReport};
use crate::sources::{CsvFolderSource, ObservationSource, OpenAqSource, SyntheticSource};
use crate::utils::progress::ProgressReporter;
use crate::utils::{generate_default_snapshot_filename, generate_default_staffing_filename};
use crate::writers::ReportWriter;

struct ReportOptions {
    output_file: Option<PathBuf>,
    staffing_file: Option<PathBuf>,
    config: Option<PathBuf>,
    station: Option<String>,
    max_workers: usize,
}

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Report {
            data_dir,
            output_file,
            staffing_file,
            config,
            station,
            max_workers,
        } => {
            let source = CsvFolderSource::new(data_dir);
            run_report(
                &source,
                ReportOptions {
                    output_file,
                    staffing_file,
                    config,
                    station,
                    max_workers,
                },
            )
            .await
        }

        Commands::Fetch {
            country,
            api_key,
            limit,
            output_file,
            staffing_file,
            config,
            station,
            max_workers,
        } => {
            let source = OpenAqSource::new()
                .with_country(country)
                .with_api_key(api_key)
                .with_page_limit(limit);
            run_report(
                &source,
                ReportOptions {
                    output_file,
                    staffing_file,
                    config,
                    station,
                    max_workers,
                },
            )
            .await
        }

        Commands::Demo {
            output_file,
            staffing_file,
            config,
            station,
            max_workers,
        } => {
            let source = SyntheticSource::new(Local::now().naive_local());
            run_report(
                &source,
                ReportOptions {
                    output_file,
                    staffing_file,
                    config,
                    station,
                    max_workers,
                },
            )
            .await
        }

        Commands::Validate { data_dir } => validate(data_dir).await,
    }
}

async fn run_report(source: &dyn ObservationSource, options: ReportOptions) -> Result<()> {
    let mut config = EngineConfig::load(options.config.as_deref())?;
    if let Some(station) = options.station {
        config.reference_station = Some(station);
    }

    let progress = ProgressReporter::spinner(
        &format!("Collecting observations from {}...", source.describe()),
        false,
    );
    let rows = source.collect().await?;

    progress.set_message("Classifying observations...");
    let pipeline = Pipeline::new(config.clone()).with_max_workers(options.max_workers);
    let report = pipeline.run(&rows)?;
    progress.finish_with_message(&format!(
        "Processed {} rows from {}",
        rows.len(),
        source.describe()
    ));

    print_report(&report, &config);
    export_report(&report, &config, options.output_file, options.staffing_file)?;

    Ok(())
}

fn print_report(report: &PipelineReport, config: &EngineConfig) {
    println!("\n{}", report.summary.detailed_summary());
    println!("{}", report.normalizer.summary());

    match &report.reference {
        Some(reference) => {
            println!(
                "\nStaffing outlook for {} (station: {})",
                config.facility_name, reference.station_name
            );
            println!(
                "  PM2.5:           {:.1} µg/m³ ({})",
                reference.pm25_value, reference.tier
            );
            println!("  Expected visits: {}/day", reference.expected_visits);
            println!(
                "  Staffing:        {} base + {} additional = {}",
                reference.staffing.base_staff,
                reference.staffing.additional_staff,
                reference.staffing.total_staff
            );
            println!("  {}", reference.staffing.guidance);
        }
        None => println!("\nNo PM2.5 snapshots available; staffing outlook skipped"),
    }
}

fn export_report(
    report: &PipelineReport,
    config: &EngineConfig,
    output_file: Option<PathBuf>,
    staffing_file: Option<PathBuf>,
) -> Result<()> {
    let writer = ReportWriter::new();
    let demand = DemandModel::new(config.demand.baseline_visits);

    let snapshot_path = output_file.unwrap_or_else(generate_default_snapshot_filename);
    if let Some(parent) = snapshot_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    writer.write_snapshots(&report.snapshots, &demand, &snapshot_path)?;
    println!("\nSnapshots written to {}", snapshot_path.display());

    if let Some(reference) = &report.reference {
        let staffing_path = staffing_file.unwrap_or_else(generate_default_staffing_filename);
        if let Some(parent) = staffing_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        writer.write_reference_report(
            reference,
            &config.facility_name,
            Local::now().naive_local(),
            &staffing_path,
        )?;
        println!("Staffing report written to {}", staffing_path.display());
    }

    Ok(())
}

async fn validate(data_dir: PathBuf) -> Result<()> {
    let source = CsvFolderSource::new(data_dir);

    let progress = ProgressReporter::spinner("Reading CSV folder...", false);
    let rows = source.collect().await?;
    let (observations, report) = ObservationNormalizer::new().normalize(&rows);
    progress.finish_with_message("Validation complete");

    println!("\n{}", report.summary());
    println!("  missing timestamp:     {}", report.missing_timestamp);
    println!("  unparseable timestamp: {}", report.unparseable_timestamp);
    println!("  missing value:         {}", report.missing_value);
    println!("  non-numeric value:     {}", report.non_numeric_value);
    println!("  negative value:        {}", report.negative_value);
    println!("  unknown pollutant:     {}", report.unknown_pollutant);
    println!("  missing station:       {}", report.missing_station);
    println!("  cleared coordinates:   {}", report.cleared_coordinates);

    if report.dropped() == 0 && !observations.is_empty() {
        println!("\nAll rows passed normalization");
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "aircesfam_engine=debug"
    } else {
        "aircesfam_engine=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
