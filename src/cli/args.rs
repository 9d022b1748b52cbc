use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aircesfam-engine")]
#[command(about = "Air-quality classification and clinic demand estimation engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline over a folder of CSV observation exports
    Report {
        #[arg(short, long, help = "Folder containing *.csv observation exports")]
        data_dir: PathBuf,

        #[arg(
            short,
            long,
            help = "Snapshot export path [default: output/aircesfam-snapshots-{YYMMDD}.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(
            long,
            help = "Staffing report path [default: output/aircesfam-staffing-{YYMMDD}.csv]"
        )]
        staffing_file: Option<PathBuf>,

        #[arg(short, long, help = "TOML configuration file")]
        config: Option<PathBuf>,

        #[arg(short, long, help = "Reference station for the staffing outlook")]
        station: Option<String>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Pull recent measurements from the OpenAQ API and run the pipeline
    Fetch {
        #[arg(long, default_value = "CL", help = "ISO country code to query")]
        country: String,

        #[arg(long, env = "OPENAQ_API_KEY", help = "OpenAQ API key")]
        api_key: Option<String>,

        #[arg(long, default_value = "1000", help = "Measurements per pollutant")]
        limit: u32,

        #[arg(
            short,
            long,
            help = "Snapshot export path [default: output/aircesfam-snapshots-{YYMMDD}.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(
            long,
            help = "Staffing report path [default: output/aircesfam-staffing-{YYMMDD}.csv]"
        )]
        staffing_file: Option<PathBuf>,

        #[arg(short, long, help = "TOML configuration file")]
        config: Option<PathBuf>,

        #[arg(short, long, help = "Reference station for the staffing outlook")]
        station: Option<String>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Run the pipeline over the built-in demo series
    Demo {
        #[arg(
            short,
            long,
            help = "Snapshot export path [default: output/aircesfam-snapshots-{YYMMDD}.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(
            long,
            help = "Staffing report path [default: output/aircesfam-staffing-{YYMMDD}.csv]"
        )]
        staffing_file: Option<PathBuf>,

        #[arg(short, long, help = "TOML configuration file")]
        config: Option<PathBuf>,

        #[arg(short, long, help = "Reference station for the staffing outlook")]
        station: Option<String>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Audit a CSV folder: report what normalization would drop, and why
    Validate {
        #[arg(short, long, help = "Folder containing *.csv observation exports")]
        data_dir: PathBuf,
    },
}
