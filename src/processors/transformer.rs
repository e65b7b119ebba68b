use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{station, weather, RawTable, Station, WeatherObservation};
use crate::processors::quarantine::QuarantineLog;
use crate::validators::{validate_station_row, validate_weather_row};

/// Row counts for one transformation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub valid: usize,
    pub rejected: usize,
}

/// Transform raw station header tables into the deduplicated station set.
///
/// Station headers are one row per file, so the whole batch is
/// concatenated before validation and audited through a single combined
/// quarantine log. Duplicated WMO identifiers resolve last-wins: the
/// later row overwrites the earlier one, keeping its output position.
pub fn transform_stations(
    mut tables: Vec<RawTable>,
    output_path: &Path,
    base_name: &str,
) -> Result<(Vec<Station>, TransformReport)> {
    for table in &mut tables {
        table.rename_columns(station::COLUMN_RENAMES);
    }

    let mut valid = Vec::new();
    let mut quarantine = QuarantineLog::new();

    let rows = tables.iter().flat_map(|t| t.rows.iter());
    for (row_index, raw) in rows.enumerate() {
        match validate_station_row(row_index, raw) {
            Ok(station) => valid.push(station),
            Err(rejection) => quarantine.push(rejection),
        }
    }

    let rejected = quarantine.len();
    quarantine.write(output_path, base_name)?;

    if valid.is_empty() {
        return Err(PipelineError::AllDataInvalid {
            dataset: "station".to_string(),
        });
    }

    let deduplicated = deduplicate_last_wins(valid);
    let report = TransformReport {
        valid: deduplicated.len(),
        rejected,
    };
    debug!(
        valid = report.valid,
        rejected = report.rejected,
        "station batch transformed"
    );

    Ok((deduplicated, report))
}

/// Transform raw observation tables into the concatenated weather set.
///
/// Weather bodies are large multi-row blocks, so each file is validated
/// and audited on its own: the quarantine log carries the file's label
/// and raw rows are never held concatenated. Files with zero surviving
/// rows are excluded from the concatenation. Observations are not
/// deduplicated.
pub fn transform_weather(
    mut tables: Vec<RawTable>,
    output_path: &Path,
) -> Result<(Vec<WeatherObservation>, TransformReport)> {
    let mut all_valid = Vec::new();
    let mut total_rejected = 0;

    for table in &mut tables {
        table.rename_columns(weather::COLUMN_RENAMES);

        let mut survivors = Vec::new();
        let mut quarantine = QuarantineLog::new();

        for (row_index, raw) in table.rows.iter().enumerate() {
            match validate_weather_row(row_index, raw) {
                Ok(observation) => survivors.push(observation),
                Err(rejection) => quarantine.push(rejection),
            }
        }

        total_rejected += quarantine.len();
        quarantine.write(output_path, &table.label)?;

        if !survivors.is_empty() {
            all_valid.extend(survivors);
        }
    }

    if all_valid.is_empty() {
        return Err(PipelineError::AllDataInvalid {
            dataset: "weather".to_string(),
        });
    }

    let report = TransformReport {
        valid: all_valid.len(),
        rejected: total_rejected,
    };
    debug!(
        valid = report.valid,
        rejected = report.rejected,
        "weather batch transformed"
    );

    Ok((all_valid, report))
}

/// Keep one station per WMO identifier; the last occurrence wins but the
/// first occurrence's position in the output is retained.
fn deduplicate_last_wins(stations: Vec<Station>) -> Vec<Station> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<Station> = Vec::with_capacity(stations.len());

    for station in stations {
        match positions.get(&station.id_station_who) {
            Some(&index) => result[index] = station,
            None => {
                positions.insert(station.id_station_who.clone(), result.len());
                result.push(station);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;
    use tempfile::TempDir;

    fn station_row(id: &str, name: &str) -> RawRow {
        let mut raw = RawRow::new();
        raw.insert("REGIAO:".into(), "SE".into());
        raw.insert("UF:".into(), "SP".into());
        raw.insert("ESTACAO:".into(), name.into());
        raw.insert("CODIGO (WMO):".into(), id.into());
        raw.insert("LATITUDE:".into(), "-23,496".into());
        raw.insert("LONGITUDE:".into(), "-46,62".into());
        raw.insert("ALTITUDE:".into(), "785,64".into());
        raw.insert("DATA DE FUNDACAO:".into(), "25/08/2006".into());
        raw
    }

    fn station_table(label: &str, rows: Vec<RawRow>) -> RawTable {
        let columns = rows
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default();
        let mut table = RawTable::new(label, columns);
        table.rows = rows;
        table
    }

    fn weather_row(date: &str, time: &str, precipitation: &str) -> RawRow {
        let mut raw = RawRow::new();
        raw.insert("CODIGO (WMO):".into(), "A001".into());
        raw.insert("Data".into(), date.into());
        raw.insert("Hora UTC".into(), time.into());
        raw.insert("PRECIPITAÇÃO TOTAL, HORÁRIO (mm)".into(), precipitation.into());
        raw
    }

    #[test]
    fn test_station_dedup_last_wins() {
        let temp_dir = TempDir::new().unwrap();
        let table = station_table(
            "batch",
            vec![
                station_row("A001", "FIRST"),
                station_row("A002", "OTHER"),
                station_row("A001", "SECOND"),
            ],
        );

        let (stations, report) =
            transform_stations(vec![table], temp_dir.path(), "stations").unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id_station_who, "A001");
        assert_eq!(stations[0].station_name, "SECOND");
        assert_eq!(stations[1].id_station_who, "A002");
        assert_eq!(report.valid, 2);
        assert_eq!(report.rejected, 0);
    }

    #[test]
    fn test_station_invalid_row_quarantined() {
        let temp_dir = TempDir::new().unwrap();
        let mut bad = station_row("A003", "BROKEN");
        bad.insert("LATITUDE:".into(), "aaaaaaaaaa".into());
        let table = station_table("batch", vec![station_row("A001", "OK"), bad]);

        let (stations, report) =
            transform_stations(vec![table], temp_dir.path(), "stations").unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(report.rejected, 1);
        let log = temp_dir.path().join("stations_invalid_records.log");
        assert!(log.exists());
        let contents = std::fs::read_to_string(log).unwrap();
        assert!(contents.starts_with("1: "));
    }

    #[test]
    fn test_station_all_invalid_is_terminal_and_logged() {
        let temp_dir = TempDir::new().unwrap();
        let mut bad = station_row("A001", "BROKEN");
        bad.remove("CODIGO (WMO):");
        let table = station_table("batch", vec![bad]);

        let err = transform_stations(vec![table], temp_dir.path(), "stations").unwrap_err();
        assert!(matches!(err, PipelineError::AllDataInvalid { .. }));
        // Log written before the terminal error so operators can diagnose
        assert!(temp_dir.path().join("stations_invalid_records.log").exists());
    }

    #[test]
    fn test_weather_per_file_logs() {
        let temp_dir = TempDir::new().unwrap();
        let columns: Vec<String> = weather_row("2020/01/01", "0000 UTC", "0")
            .keys()
            .cloned()
            .collect();

        let mut good = RawTable::new("good_file", columns.clone());
        good.rows = vec![
            weather_row("2020/01/01", "0000 UTC", "0"),
            weather_row("2020/01/01", "0100 UTC", "1,2"),
        ];

        let mut mixed = RawTable::new("mixed_file", columns);
        mixed.rows = vec![
            weather_row("2020/01/02", "0000 UTC", "0"),
            weather_row("bad-date", "0100 UTC", "0"),
        ];

        let (observations, report) =
            transform_weather(vec![good, mixed], temp_dir.path()).unwrap();

        assert_eq!(observations.len(), 3);
        assert_eq!(report.rejected, 1);
        assert!(!temp_dir.path().join("good_file_invalid_records.log").exists());
        assert!(temp_dir.path().join("mixed_file_invalid_records.log").exists());
    }

    #[test]
    fn test_weather_all_invalid_is_terminal() {
        let temp_dir = TempDir::new().unwrap();
        let mut table = RawTable::new("broken", vec!["Data".into()]);
        table.rows = vec![weather_row("nope", "", "")];

        let err = transform_weather(vec![table], temp_dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::AllDataInvalid { .. }));
        assert!(temp_dir.path().join("broken_invalid_records.log").exists());
    }

    #[test]
    fn test_weather_no_dedup() {
        let temp_dir = TempDir::new().unwrap();
        let mut table = RawTable::new("dup", vec!["Data".into()]);
        table.rows = vec![
            weather_row("2020/01/01", "0000 UTC", "0"),
            weather_row("2020/01/01", "0000 UTC", "0"),
        ];

        let (observations, _) = transform_weather(vec![table], temp_dir.path()).unwrap();
        assert_eq!(observations.len(), 2);
    }
}
