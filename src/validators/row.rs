use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use validator::Validate;

use crate::models::{RawRow, Station, WeatherObservation};
use crate::validators::fields::{
    clamp_or_absent, parse_date, parse_decimal_comma, parse_signed_or_absent, parse_station_id,
    parse_utc_time, uppercase_text, FormatError,
};
use crate::validators::schema::{station_schema, weather_schema, Coercion, RecordSchema};

/// A successfully coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    OptionalFloat(Option<f64>),
}

/// A raw row after every field passed its coercion rule.
///
/// Accessors panic on a missing or mistyped field: the schema guarantees
/// both, so a mismatch is a programmer error, not a data error.
#[derive(Debug, Clone)]
pub struct CoercedRow {
    values: HashMap<&'static str, FieldValue>,
}

impl CoercedRow {
    fn value(&self, name: &str) -> &FieldValue {
        self.values
            .get(name)
            .unwrap_or_else(|| panic!("field '{}' absent from coerced row", name))
    }

    pub fn text(&self, name: &str) -> &str {
        match self.value(name) {
            FieldValue::Text(s) => s,
            other => panic!("field '{}' is not text: {:?}", name, other),
        }
    }

    pub fn float(&self, name: &str) -> f64 {
        match self.value(name) {
            FieldValue::Float(v) => *v,
            other => panic!("field '{}' is not a float: {:?}", name, other),
        }
    }

    pub fn date(&self, name: &str) -> NaiveDate {
        match self.value(name) {
            FieldValue::Date(d) => *d,
            other => panic!("field '{}' is not a date: {:?}", name, other),
        }
    }

    pub fn time(&self, name: &str) -> NaiveTime {
        match self.value(name) {
            FieldValue::Time(t) => *t,
            other => panic!("field '{}' is not a time: {:?}", name, other),
        }
    }

    pub fn optional_float(&self, name: &str) -> Option<f64> {
        match self.value(name) {
            FieldValue::OptionalFloat(v) => *v,
            other => panic!("field '{}' is not an optional float: {:?}", name, other),
        }
    }
}

/// One field-level failure inside a rejected row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFailure {
    pub field: String,
    pub value: String,
    pub reason: String,
}

/// A rejected row: its zero-based index within the source table and
/// every field-level failure found in it.
#[derive(Debug, Clone, Serialize)]
pub struct RowRejection {
    pub row_index: usize,
    pub failures: Vec<FieldFailure>,
}

impl RowRejection {
    /// Structured failure detail, one JSON array per row.
    pub fn detail(&self) -> String {
        serde_json::to_string(&self.failures).unwrap_or_else(|_| format!("{:?}", self.failures))
    }

    /// The quarantine log line for this rejection.
    pub fn log_line(&self) -> String {
        format!("{}: {}", self.row_index, self.detail())
    }
}

fn apply_coercion(coercion: Coercion, raw: &str) -> Result<FieldValue, FormatError> {
    match coercion {
        Coercion::Uppercase => Ok(FieldValue::Text(uppercase_text(raw))),
        Coercion::StationId => parse_station_id(raw).map(FieldValue::Text),
        Coercion::DecimalComma => parse_decimal_comma(raw).map(FieldValue::Float),
        Coercion::Date(formats) => parse_date(raw, formats).map(FieldValue::Date),
        Coercion::UtcTime => parse_utc_time(raw).map(FieldValue::Time),
        Coercion::NonNegativeOrAbsent => clamp_or_absent(raw).map(FieldValue::OptionalFloat),
        Coercion::SignedOrAbsent => Ok(FieldValue::OptionalFloat(parse_signed_or_absent(raw))),
    }
}

/// Run every field of `schema` through its coercion rule.
///
/// Failures are collected across the whole row rather than stopping at
/// the first, so the quarantine log names everything wrong with a row.
pub fn coerce_row(schema: &RecordSchema, raw: &RawRow) -> Result<CoercedRow, Vec<FieldFailure>> {
    let mut values = HashMap::with_capacity(schema.fields.len());
    let mut failures = Vec::new();

    for spec in schema.fields {
        let raw_value = match raw.get(spec.name) {
            Some(v) => v.as_str(),
            None if spec.required => {
                failures.push(FieldFailure {
                    field: spec.name.to_string(),
                    value: String::new(),
                    reason: "required field missing".to_string(),
                });
                continue;
            }
            None => "",
        };

        match apply_coercion(spec.coercion, raw_value) {
            Ok(value) => {
                values.insert(spec.name, value);
            }
            Err(FormatError(reason)) => failures.push(FieldFailure {
                field: spec.name.to_string(),
                value: raw_value.to_string(),
                reason,
            }),
        }
    }

    if failures.is_empty() {
        Ok(CoercedRow { values })
    } else {
        Err(failures)
    }
}

fn constraint_failures(errors: &validator::ValidationErrors) -> Vec<FieldFailure> {
    let mut failures: Vec<FieldFailure> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldFailure {
                field: field.to_string(),
                value: err
                    .params
                    .get("value")
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                reason: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("constraint violated: {}", err.code)),
            })
        })
        .collect();
    failures.sort_by(|a, b| a.field.cmp(&b.field));
    failures
}

/// Validate one raw station row; never partial, never a panic for data
/// shape reasons.
pub fn validate_station_row(row_index: usize, raw: &RawRow) -> Result<Station, RowRejection> {
    let coerced = coerce_row(station_schema(), raw)
        .map_err(|failures| RowRejection { row_index, failures })?;

    let station = Station::from_coerced(&coerced);
    if let Err(errors) = station.validate() {
        return Err(RowRejection {
            row_index,
            failures: constraint_failures(&errors),
        });
    }

    Ok(station)
}

/// Validate one raw hourly observation row.
pub fn validate_weather_row(
    row_index: usize,
    raw: &RawRow,
) -> Result<WeatherObservation, RowRejection> {
    let coerced = coerce_row(weather_schema(), raw)
        .map_err(|failures| RowRejection { row_index, failures })?;

    Ok(WeatherObservation::from_coerced(&coerced))
}
