use std::path::{Path, PathBuf};

/// How a failed Parquet write at the end of a batch is handled.
///
/// `Lenient` reports the error and keeps the run alive so the validation
/// work (quarantine logs included) is not lost; `Strict` propagates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    Strict,
    Lenient,
}

/// Explicit pipeline configuration, passed into the entry points.
///
/// Replaces process-wide constants so multiple configurations can coexist
/// in one process (tests run each batch against its own folders).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_path: PathBuf,
    pub stations_file_name: String,
    pub weather_file_name: String,
    pub persistence: PersistenceMode,
    pub compression: String,
}

impl PipelineConfig {
    pub fn new(output_path: impl AsRef<Path>) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            stations_file_name: "stations".to_string(),
            weather_file_name: "weather".to_string(),
            persistence: PersistenceMode::Strict,
            compression: "snappy".to_string(),
        }
    }

    pub fn with_persistence(mut self, persistence: PersistenceMode) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_compression(mut self, compression: &str) -> Self {
        self.compression = compression.to_string();
        self
    }

    pub fn stations_parquet_path(&self) -> PathBuf {
        self.output_path
            .join(format!("{}.parquet", self.stations_file_name))
    }

    pub fn weather_parquet_path(&self) -> PathBuf {
        self.output_path
            .join(format!("{}.parquet", self.weather_file_name))
    }
}
