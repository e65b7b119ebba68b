use std::path::PathBuf;

use chrono::Local;
use tempfile::TempDir;

use crate::archive::{clear_folder, extract_archive};
use crate::cli::args::{Cli, Commands};
use crate::collectors::{StationCollector, WeatherCollector};
use crate::config::{PersistenceMode, PipelineConfig};
use crate::error::Result;
use crate::utils::progress::ProgressReporter;
use crate::utils::years::filter_requested_years;
use crate::writers::ParquetWriter;

pub async fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Process {
            years,
            input_dir,
            output_dir,
            compression,
            lenient_persistence,
            stage_dir,
        } => {
            let years = filter_requested_years(&years, Local::now().date_naive())?;
            println!("Processing INMET data for years {:?}", years);
            println!("Input directory: {}", input_dir.display());
            println!("Output directory: {}", output_dir.display());

            // A caller-supplied staging folder is cleared afterwards; a
            // temporary one is removed on drop.
            let mut temp_stage = None;
            let stage: PathBuf = match stage_dir {
                Some(dir) => {
                    std::fs::create_dir_all(&dir)?;
                    dir
                }
                None => {
                    let temp = TempDir::new()?;
                    let path = temp.path().to_path_buf();
                    temp_stage = Some(temp);
                    path
                }
            };

            let progress =
                ProgressReporter::new(years.len() as u64, "Extracting archives...", false);
            for year in &years {
                let archive = input_dir.join(format!("{year}.zip"));
                progress.set_message(&format!("Extracting {}", archive.display()));
                let count = extract_archive(&archive, &stage)?;
                progress.println(&format!("{year}: {count} files extracted"));
                progress.increment(1);
            }
            progress.finish_with_message("Archives extracted");

            let config = build_config(&output_dir, &compression, lenient_persistence);
            process_folder(&stage, &config)?;

            if temp_stage.is_none() {
                clear_folder(&stage)?;
            }

            println!("Processing complete!");
        }

        Commands::Stations {
            input_folder,
            output_dir,
            compression,
            lenient_persistence,
        } => {
            println!("Building station table...");
            println!("Input folder: {}", input_folder.display());

            let config = build_config(&output_dir, &compression, lenient_persistence);
            let collector = StationCollector::new(&input_folder, config.clone());
            let (stations, report) = collector.run()?;

            println!(
                "Stations: {} valid, {} rejected",
                stations.len(),
                report.rejected
            );
            print_file_summary(&config.stations_parquet_path());
        }

        Commands::Weather {
            input_folder,
            output_dir,
            compression,
            lenient_persistence,
        } => {
            println!("Building weather observation table...");
            println!("Input folder: {}", input_folder.display());

            let config = build_config(&output_dir, &compression, lenient_persistence);
            let collector = WeatherCollector::new(&input_folder, config.clone());
            let (observations, report) = collector.run()?;

            println!(
                "Observations: {} valid, {} rejected",
                observations.len(),
                report.rejected
            );
            print_file_summary(&config.weather_parquet_path());
        }

        Commands::Validate {
            input_folder,
            output_dir,
        } => {
            println!("Validating INMET data...");
            println!("Input folder: {}", input_folder.display());

            let config = PipelineConfig::new(&output_dir);

            let progress = ProgressReporter::new_spinner("Validating data...", false);
            let (_, station_report) =
                StationCollector::new(&input_folder, config.clone()).collect()?;
            let (_, weather_report) =
                WeatherCollector::new(&input_folder, config.clone()).collect()?;
            progress.finish_with_message("Validation complete");

            println!(
                "Stations: {} valid, {} rejected",
                station_report.valid, station_report.rejected
            );
            println!(
                "Observations: {} valid, {} rejected",
                weather_report.valid, weather_report.rejected
            );

            if station_report.rejected == 0 && weather_report.rejected == 0 {
                println!("All rows passed validation");
            } else {
                println!(
                    "Quarantine logs written to {}",
                    config.output_path.display()
                );
            }
        }

        Commands::Info { file } => {
            let info = ParquetWriter::new().file_info(&file)?;
            println!("File: {}", file.display());
            println!("Rows: {}", info.total_rows);
            println!("Size: {} bytes", info.file_size);
        }
    }

    Ok(())
}

fn build_config(output_dir: &PathBuf, compression: &str, lenient: bool) -> PipelineConfig {
    let persistence = if lenient {
        PersistenceMode::Lenient
    } else {
        PersistenceMode::Strict
    };
    PipelineConfig::new(output_dir)
        .with_compression(compression)
        .with_persistence(persistence)
}

fn process_folder(stage: &PathBuf, config: &PipelineConfig) -> Result<()> {
    let (stations, station_report) =
        StationCollector::new(stage, config.clone()).run()?;
    println!(
        "Stations: {} valid, {} rejected",
        stations.len(),
        station_report.rejected
    );
    print_file_summary(&config.stations_parquet_path());

    let (observations, weather_report) =
        WeatherCollector::new(stage, config.clone()).run()?;
    println!(
        "Observations: {} valid, {} rejected",
        observations.len(),
        weather_report.rejected
    );
    print_file_summary(&config.weather_parquet_path());

    Ok(())
}

fn print_file_summary(path: &std::path::Path) {
    if let Ok(info) = ParquetWriter::new().file_info(path) {
        println!(
            "Wrote {} ({} rows, {} bytes)",
            path.display(),
            info.total_rows,
            info.file_size
        );
    }
}
