use std::fs;
use std::path::Path;

use encoding_rs::mem::decode_latin1;

use crate::error::{PipelineError, Result};
use crate::models::{RawRow, RawTable};
use crate::readers::station_reader::{file_label, parse_header_block, HEADER_LINES};

/// Header label carrying the station identity for the observation body.
const STATION_ID_LABEL: &str = "CODIGO (WMO):";

/// Sentinel the source files use for missing measurements.
const MISSING_SENTINEL: &str = "-9999";

/// Read one weather file: the 8-line header (station identity only) plus
/// the semicolon-delimited hourly observation body.
///
/// Every body row is stamped with the station identity taken from the
/// file's header. Cells holding the `-9999` sentinel are normalised to
/// empty, and all values stay raw strings so coercion is deferred to the
/// validator.
pub fn read_weather_file(path: &Path) -> Result<RawTable> {
    let bytes = fs::read(path)?;
    let text = decode_latin1(&bytes);
    let label = file_label(path);

    let header = parse_header_block(&text, &label)?;
    let station_id = header
        .iter()
        .find(|(key, _)| key == STATION_ID_LABEL)
        .map(|(_, value)| value.clone())
        .ok_or_else(|| PipelineError::MalformedHeader {
            file: label.clone(),
            message: format!("header has no '{}' line", STATION_ID_LABEL),
        })?;

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= HEADER_LINES {
        return Err(PipelineError::MalformedHeader {
            file: label,
            message: "file has no observation body".to_string(),
        });
    }
    let body = lines[HEADER_LINES..].join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(body.as_bytes());

    // The source files end every line with ';', which surfaces as one
    // trailing empty column name.
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect();

    let mut columns = headers.clone();
    columns.push(STATION_ID_LABEL.to_string());
    let mut table = RawTable::new(label, columns);

    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (i, column) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("").trim();
            let value = if value == MISSING_SENTINEL { "" } else { value };
            row.insert(column.clone(), value.to_string());
        }
        row.insert(STATION_ID_LABEL.to_string(), station_id.clone());
        table.rows.push(row);
    }

    Ok(table)
}
