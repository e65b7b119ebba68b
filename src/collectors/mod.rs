pub mod station_collector;
pub mod weather_collector;

pub use station_collector::StationCollector;
pub use weather_collector::WeatherCollector;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PersistenceMode;
use crate::error::{PipelineError, Result};

/// List the CSV files in a folder, sorted by name.
///
/// Matching is case-insensitive because INMET has shipped both `.CSV`
/// and `.csv` extensions over the years.
pub fn list_csv_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if path.is_file() && is_csv {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(PipelineError::NoInput {
            folder: folder.to_path_buf(),
        });
    }

    files.sort();
    Ok(files)
}

/// Apply the configured persistence policy to a write outcome.
///
/// Lenient mode reports the failure and lets the run finish with the
/// validated records already in hand; strict mode aborts.
pub(crate) fn handle_persistence(
    mode: PersistenceMode,
    path: &Path,
    outcome: Result<()>,
) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(err) => match mode {
            PersistenceMode::Strict => Err(err),
            PersistenceMode::Lenient => {
                tracing::error!(
                    path = %path.display(),
                    error = %err,
                    "failed to persist output table, continuing"
                );
                Ok(())
            }
        },
    }
}
