use std::fs;
use std::path::Path;

use encoding_rs::mem::decode_latin1;

use crate::error::{PipelineError, Result};
use crate::models::{RawRow, RawTable};

/// Number of `LABEL:;VALUE` lines at the top of every INMET export.
pub const HEADER_LINES: usize = 8;

pub(crate) fn file_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Parse the fixed 8-line header block into ordered `(label, value)` pairs.
pub(crate) fn parse_header_block(text: &str, label: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(HEADER_LINES);

    for line in text.lines().take(HEADER_LINES) {
        let (key, value) = line.split_once(';').ok_or_else(|| {
            PipelineError::MalformedHeader {
                file: label.to_string(),
                message: format!("header line is not a 'LABEL:;VALUE' pair: '{}'", line),
            }
        })?;
        pairs.push((
            key.trim().to_string(),
            value.trim().trim_end_matches(';').trim().to_string(),
        ));
    }

    if pairs.len() != HEADER_LINES {
        return Err(PipelineError::MalformedHeader {
            file: label.to_string(),
            message: format!("expected {} header lines, found {}", HEADER_LINES, pairs.len()),
        });
    }

    Ok(pairs)
}

/// Read one file's station identity header as a single-row table.
///
/// The 8 `LABEL:;VALUE` lines are transposed: labels become columns and
/// the file contributes exactly one row. Values are kept as raw strings
/// (decimal commas included) so coercion stays with the validator.
pub fn read_station_header(path: &Path) -> Result<RawTable> {
    let bytes = fs::read(path)?;
    let text = decode_latin1(&bytes);
    let label = file_label(path);

    let pairs = parse_header_block(&text, &label)?;

    let columns: Vec<String> = pairs.iter().map(|(k, _)| k.clone()).collect();
    let mut row = RawRow::new();
    for (key, value) in pairs {
        row.insert(key, value);
    }

    let mut table = RawTable::new(label, columns);
    table.rows.push(row);
    Ok(table)
}
