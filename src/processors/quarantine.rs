use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::validators::RowRejection;

/// Batch-scoped accumulator for rejected rows.
///
/// Entries keep discovery order; the log file is only created when at
/// least one row failed, so file presence is itself a signal.
#[derive(Debug, Default)]
pub struct QuarantineLog {
    entries: Vec<RowRejection>,
}

impl QuarantineLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rejection: RowRejection) {
        self.entries.push(rejection);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Persist the log as `{output_path}/{base_name}_invalid_records.log`.
    ///
    /// Returns the written path, or `None` when there was nothing to log.
    pub fn write(&self, output_path: &Path, base_name: &str) -> Result<Option<PathBuf>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        fs::create_dir_all(output_path)?;
        let log_path = output_path.join(format!("{}_invalid_records.log", base_name));

        let mut file = fs::File::create(&log_path)?;
        for rejection in &self.entries {
            writeln!(file, "{}", rejection.log_line())?;
        }

        Ok(Some(log_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::row::FieldFailure;
    use tempfile::TempDir;

    fn rejection(index: usize) -> RowRejection {
        RowRejection {
            row_index: index,
            failures: vec![FieldFailure {
                field: "Latitude".into(),
                value: "bogus".into(),
                reason: "not a number: 'bogus'".into(),
            }],
        }
    }

    #[test]
    fn test_empty_log_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let log = QuarantineLog::new();

        let written = log.write(temp_dir.path(), "stations").unwrap();
        assert!(written.is_none());
        assert!(!temp_dir.path().join("stations_invalid_records.log").exists());
    }

    #[test]
    fn test_entries_written_in_row_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = QuarantineLog::new();
        log.push(rejection(2));
        log.push(rejection(5));

        let path = log.write(temp_dir.path(), "stations").unwrap().unwrap();
        assert_eq!(path, temp_dir.path().join("stations_invalid_records.log"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2: "));
        assert!(lines[1].starts_with("5: "));
    }

    #[test]
    fn test_parent_directories_created() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("deep");
        let mut log = QuarantineLog::new();
        log.push(rejection(0));

        let path = log.write(&nested, "weather_2020").unwrap().unwrap();
        assert!(path.exists());
    }
}
