use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inmet-processor")]
#[command(about = "INMET automatic weather station data processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract year archives and build the station and weather datasets
    Process {
        #[arg(help = "Years to process, e.g. 2010 2023")]
        years: Vec<i32>,

        #[arg(short, long, help = "Directory containing {year}.zip archives")]
        input_dir: PathBuf,

        #[arg(short, long, default_value = "data/output")]
        output_dir: PathBuf,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(
            long,
            default_value = "false",
            help = "Report Parquet write failures without aborting the run"
        )]
        lenient_persistence: bool,

        #[arg(
            long,
            help = "Staging folder for extracted files [default: temporary directory]"
        )]
        stage_dir: Option<PathBuf>,
    },

    /// Build the station table from an extracted folder
    Stations {
        #[arg(short, long, help = "Folder of extracted INMET CSV files")]
        input_folder: PathBuf,

        #[arg(short, long, default_value = "data/output")]
        output_dir: PathBuf,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(long, default_value = "false")]
        lenient_persistence: bool,
    },

    /// Build the weather observation table from an extracted folder
    Weather {
        #[arg(short, long, help = "Folder of extracted INMET CSV files")]
        input_folder: PathBuf,

        #[arg(short, long, default_value = "data/output")]
        output_dir: PathBuf,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(long, default_value = "false")]
        lenient_persistence: bool,
    },

    /// Validate an extracted folder without writing Parquet
    Validate {
        #[arg(short, long, help = "Folder of extracted INMET CSV files")]
        input_folder: PathBuf,

        #[arg(
            short,
            long,
            default_value = "data/output",
            help = "Where quarantine logs are written"
        )]
        output_dir: PathBuf,
    },

    /// Display row count and size of a written Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,
    },
}
