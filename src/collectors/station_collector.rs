use std::fs;
use std::path::PathBuf;

use crate::collectors::{handle_persistence, list_csv_files};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::Station;
use crate::processors::{transform_stations, TransformReport};
use crate::readers::read_station_header;
use crate::validators::check_column_consistency;
use crate::writers::ParquetWriter;

/// Builds the station table from the identity headers of a folder of
/// INMET exports.
pub struct StationCollector {
    input_folder: PathBuf,
    config: PipelineConfig,
}

impl StationCollector {
    pub fn new(input_folder: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        Self {
            input_folder: input_folder.into(),
            config,
        }
    }

    /// Read, gate and validate the station headers without persisting.
    pub fn collect(&self) -> Result<(Vec<Station>, TransformReport)> {
        let files = list_csv_files(&self.input_folder)?;
        tracing::info!(files = files.len(), "collecting station headers");

        let tables = files
            .iter()
            .map(|path| read_station_header(path))
            .collect::<Result<Vec<_>>>()?;

        check_column_consistency(&tables)?;

        transform_stations(
            tables,
            &self.config.output_path,
            &self.config.stations_file_name,
        )
    }

    /// Collect and persist the station table as Parquet.
    pub fn run(&self) -> Result<(Vec<Station>, TransformReport)> {
        let (stations, report) = self.collect()?;

        let path = self.config.stations_parquet_path();
        let outcome = fs::create_dir_all(&self.config.output_path)
            .map_err(Into::into)
            .and_then(|_| {
                ParquetWriter::new()
                    .with_compression(&self.config.compression)?
                    .write_stations(&stations, &path)
            });
        handle_persistence(self.config.persistence, &path, outcome)?;

        Ok((stations, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersistenceMode;
    use crate::error::PipelineError;
    use tempfile::TempDir;

    fn write_header(dir: &std::path::Path, name: &str, id: &str, latitude: &str) {
        let contents = format!(
            "REGIAO:;SE\n\
UF:;SP\n\
ESTACAO:;SAO PAULO - MIRANTE\n\
CODIGO (WMO):;{id}\n\
LATITUDE:;{latitude}\n\
LONGITUDE:;-46,62\n\
ALTITUDE:;785,64\n\
DATA DE FUNDACAO:;25/08/2006\n"
        );
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_run_writes_parquet_and_no_quarantine() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_header(input.path(), "A701.csv", "A701", "-23,496");
        write_header(input.path(), "A702.csv", "A702", "-22,11");

        let config = PipelineConfig::new(output.path());
        let collector = StationCollector::new(input.path(), config.clone());
        let (stations, report) = collector.run().unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(report.valid, 2);
        assert_eq!(report.rejected, 0);
        assert!(config.stations_parquet_path().exists());
        assert!(!output.path().join("stations_invalid_records.log").exists());
    }

    #[test]
    fn test_collect_does_not_persist() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_header(input.path(), "A701.csv", "A701", "-23,496");

        let config = PipelineConfig::new(output.path());
        let collector = StationCollector::new(input.path(), config.clone());
        let (stations, _) = collector.collect().unwrap();

        assert_eq!(stations.len(), 1);
        assert!(!config.stations_parquet_path().exists());
    }

    #[test]
    fn test_empty_input_folder_fails() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let collector = StationCollector::new(input.path(), PipelineConfig::new(output.path()));
        assert!(matches!(
            collector.run().unwrap_err(),
            PipelineError::NoInput { .. }
        ));
    }

    #[test]
    fn test_lenient_mode_survives_unwritable_output() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_header(input.path(), "A701.csv", "A701", "-23,496");

        // Output path collides with an existing file so create_dir_all fails
        let blocked = output.path().join("blocked");
        fs::write(&blocked, "x").unwrap();

        let config =
            PipelineConfig::new(&blocked).with_persistence(PersistenceMode::Lenient);
        let collector = StationCollector::new(input.path(), config);
        // Quarantine writing also targets the blocked path, but with no
        // rejections nothing is written before the persistence step.
        let (stations, _) = collector.run().unwrap();
        assert_eq!(stations.len(), 1);
    }
}
