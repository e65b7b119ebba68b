use std::fs;
use std::path::PathBuf;

use crate::collectors::{handle_persistence, list_csv_files};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::WeatherObservation;
use crate::processors::{transform_weather, TransformReport};
use crate::readers::read_weather_file;
use crate::validators::check_column_consistency;
use crate::writers::ParquetWriter;

/// Builds the hourly observation table from the bodies of a folder of
/// INMET exports.
pub struct WeatherCollector {
    input_folder: PathBuf,
    config: PipelineConfig,
}

impl WeatherCollector {
    pub fn new(input_folder: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        Self {
            input_folder: input_folder.into(),
            config,
        }
    }

    /// Read, gate and validate the observation bodies without persisting.
    pub fn collect(&self) -> Result<(Vec<WeatherObservation>, TransformReport)> {
        let files = list_csv_files(&self.input_folder)?;
        tracing::info!(files = files.len(), "collecting weather observations");

        let tables = files
            .iter()
            .map(|path| read_weather_file(path))
            .collect::<Result<Vec<_>>>()?;

        check_column_consistency(&tables)?;

        transform_weather(tables, &self.config.output_path)
    }

    /// Collect and persist the observation table as Parquet.
    pub fn run(&self) -> Result<(Vec<WeatherObservation>, TransformReport)> {
        let (observations, report) = self.collect()?;

        let path = self.config.weather_parquet_path();
        let outcome = fs::create_dir_all(&self.config.output_path)
            .map_err(Into::into)
            .and_then(|_| {
                ParquetWriter::new()
                    .with_compression(&self.config.compression)?
                    .write_observations(&observations, &path)
            });
        handle_persistence(self.config.persistence, &path, outcome)?;

        Ok((observations, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str = "REGIAO:;SE\n\
UF:;SP\n\
ESTACAO:;SAO PAULO - MIRANTE\n\
CODIGO (WMO):;A701\n\
LATITUDE:;-23,496\n\
LONGITUDE:;-46,62\n\
ALTITUDE:;785,64\n\
DATA DE FUNDACAO:;25/08/2006\n";

    fn write_weather_file(dir: &Path, name: &str, rows: &[&str]) {
        let mut contents = String::from(HEADER);
        contents.push_str(
            "Data;Hora UTC;PRECIPITAÇÃO TOTAL, HORÁRIO (mm);VENTO, VELOCIDADE HORARIA (m/s);\n",
        );
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&contents);
        fs::write(dir.join(name), encoded).unwrap();
    }

    #[test]
    fn test_run_writes_parquet() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_weather_file(
            input.path(),
            "A701_2020.csv",
            &["2020/01/01;0000 UTC;0,2;1,5;", "2020/01/01;0100 UTC;0;2,1;"],
        );

        let config = PipelineConfig::new(output.path());
        let collector = WeatherCollector::new(input.path(), config.clone());
        let (observations, report) = collector.run().unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(report.valid, 2);
        assert!(config.weather_parquet_path().exists());
    }

    #[test]
    fn test_mismatched_columns_across_files_fail() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_weather_file(input.path(), "A701_2020.csv", &["2020/01/01;0000 UTC;0,2;1,5;"]);

        // Second file drops the wind column
        let mut contents = String::from(HEADER);
        contents.push_str("Data;Hora UTC;PRECIPITAÇÃO TOTAL, HORÁRIO (mm);\n");
        contents.push_str("2020/01/01;0000 UTC;0,2;\n");
        let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&contents);
        fs::write(input.path().join("A702_2020.csv"), encoded).unwrap();

        let collector = WeatherCollector::new(input.path(), PipelineConfig::new(output.path()));
        let err = collector.run().unwrap_err();
        match err {
            PipelineError::InconsistentSchema { file, missing, .. } => {
                assert_eq!(file, "A702_2020");
                assert_eq!(missing, vec!["VENTO, VELOCIDADE HORARIA (m/s)".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
