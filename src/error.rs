use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("No CSV files found in {folder}")]
    NoInput { folder: PathBuf },

    #[error(
        "Inconsistent columns in '{file}': missing {missing:?}, unexpected {unexpected:?}"
    )]
    InconsistentSchema {
        file: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("All collected {dataset} data was invalid")]
    AllDataInvalid { dataset: String },

    #[error("Malformed header in '{file}': {message}")]
    MalformedHeader { file: String, message: String },

    #[error("No valid years to process. Provide years between {first} and {last}")]
    InvalidYears { first: i32, last: i32 },

    #[error("Configuration error: {0}")]
    Config(String),
}
