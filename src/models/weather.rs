use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::station::ID_STATION_WHO;
use crate::validators::row::CoercedRow;

/// Canonical column names of the weather observations table.
pub const DATE: &str = "Date";
pub const TIME: &str = "Time";
pub const TOTAL_PRECIPITATION: &str = "TotalPrecipitation";
pub const ATMOSPHERIC_PRESSURE: &str = "AtmosphericPressure";
pub const MAX_ATMOSPHERIC_PRESSURE: &str = "MaxAtmosphericPressure";
pub const MIN_ATMOSPHERIC_PRESSURE: &str = "MinAtmosphericPressure";
pub const GLOBAL_RADIATION: &str = "GlobalRadiation";
pub const DRY_BULB_TEMPERATURE: &str = "DryBulbTemperature";
pub const DEW_POINT_TEMPERATURE: &str = "DewPointTemperature";
pub const MAX_TEMPERATURE: &str = "MaxTemperature";
pub const MIN_TEMPERATURE: &str = "MinTemperature";
pub const MAX_DEW_POINT_TEMPERATURE: &str = "MaxDewPointTemperature";
pub const MIN_DEW_POINT_TEMPERATURE: &str = "MinDewPointTemperature";
pub const MAX_RELATIVE_HUMIDITY: &str = "MaxRelativeHumidity";
pub const MIN_RELATIVE_HUMIDITY: &str = "MinRelativeHumidity";
pub const RELATIVE_HUMIDITY: &str = "RelativeHumidity";
pub const WIND_DIRECTION: &str = "WindDirection";
pub const MAX_WIND_GUST: &str = "MaxWindGust";
pub const WIND_SPEED: &str = "WindSpeed";

/// Rename table for the 19-column hourly observation body plus the
/// station identity stamped from each file's header block.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("CODIGO (WMO):", ID_STATION_WHO),
    ("Data", DATE),
    ("Hora UTC", TIME),
    ("PRECIPITAÇÃO TOTAL, HORÁRIO (mm)", TOTAL_PRECIPITATION),
    (
        "PRESSAO ATMOSFERICA AO NIVEL DA ESTACAO, HORARIA (mB)",
        ATMOSPHERIC_PRESSURE,
    ),
    (
        "PRESSÃO ATMOSFERICA MAX.NA HORA ANT. (AUT) (mB)",
        MAX_ATMOSPHERIC_PRESSURE,
    ),
    (
        "PRESSÃO ATMOSFERICA MIN. NA HORA ANT. (AUT) (mB)",
        MIN_ATMOSPHERIC_PRESSURE,
    ),
    ("RADIACAO GLOBAL (Kj/m²)", GLOBAL_RADIATION),
    (
        "TEMPERATURA DO AR - BULBO SECO, HORARIA (°C)",
        DRY_BULB_TEMPERATURE,
    ),
    ("TEMPERATURA DO PONTO DE ORVALHO (°C)", DEW_POINT_TEMPERATURE),
    ("TEMPERATURA MÁXIMA NA HORA ANT. (AUT) (°C)", MAX_TEMPERATURE),
    ("TEMPERATURA MÍNIMA NA HORA ANT. (AUT) (°C)", MIN_TEMPERATURE),
    (
        "TEMPERATURA ORVALHO MAX. NA HORA ANT. (AUT) (°C)",
        MAX_DEW_POINT_TEMPERATURE,
    ),
    (
        "TEMPERATURA ORVALHO MIN. NA HORA ANT. (AUT) (°C)",
        MIN_DEW_POINT_TEMPERATURE,
    ),
    (
        "UMIDADE REL. MAX. NA HORA ANT. (AUT) (%)",
        MAX_RELATIVE_HUMIDITY,
    ),
    (
        "UMIDADE REL. MIN. NA HORA ANT. (AUT) (%)",
        MIN_RELATIVE_HUMIDITY,
    ),
    ("UMIDADE RELATIVA DO AR, HORARIA (%)", RELATIVE_HUMIDITY),
    ("VENTO, DIREÇÃO HORARIA (gr) (° (gr))", WIND_DIRECTION),
    ("VENTO, RAJADA MAXIMA (m/s)", MAX_WIND_GUST),
    ("VENTO, VELOCIDADE HORARIA (m/s)", WIND_SPEED),
];

/// One hourly observation reported by a station.
///
/// Every measurement is optional: the source files mark gaps with empty
/// cells or the -9999 sentinel, and the non-negative fields additionally
/// drop parsed negatives to absent during coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub id_station_who: String,
    pub date: NaiveDate,
    pub time: NaiveTime,

    pub total_precipitation: Option<f64>,
    pub atmospheric_pressure: Option<f64>,
    pub max_atmospheric_pressure: Option<f64>,
    pub min_atmospheric_pressure: Option<f64>,
    pub global_radiation: Option<f64>,

    // Temperature-class fields, the only ones permitted to be negative
    pub dry_bulb_temperature: Option<f64>,
    pub dew_point_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_dew_point_temperature: Option<f64>,
    pub min_dew_point_temperature: Option<f64>,

    pub max_relative_humidity: Option<f64>,
    pub min_relative_humidity: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_direction: Option<f64>,
    pub max_wind_gust: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl WeatherObservation {
    /// Build an observation from a fully coerced row.
    ///
    /// The row must have passed coercion against the weather schema; a
    /// missing or mistyped field here is a programmer error and panics.
    pub fn from_coerced(row: &CoercedRow) -> Self {
        Self {
            id_station_who: row.text(ID_STATION_WHO).to_string(),
            date: row.date(DATE),
            time: row.time(TIME),
            total_precipitation: row.optional_float(TOTAL_PRECIPITATION),
            atmospheric_pressure: row.optional_float(ATMOSPHERIC_PRESSURE),
            max_atmospheric_pressure: row.optional_float(MAX_ATMOSPHERIC_PRESSURE),
            min_atmospheric_pressure: row.optional_float(MIN_ATMOSPHERIC_PRESSURE),
            global_radiation: row.optional_float(GLOBAL_RADIATION),
            dry_bulb_temperature: row.optional_float(DRY_BULB_TEMPERATURE),
            dew_point_temperature: row.optional_float(DEW_POINT_TEMPERATURE),
            max_temperature: row.optional_float(MAX_TEMPERATURE),
            min_temperature: row.optional_float(MIN_TEMPERATURE),
            max_dew_point_temperature: row.optional_float(MAX_DEW_POINT_TEMPERATURE),
            min_dew_point_temperature: row.optional_float(MIN_DEW_POINT_TEMPERATURE),
            max_relative_humidity: row.optional_float(MAX_RELATIVE_HUMIDITY),
            min_relative_humidity: row.optional_float(MIN_RELATIVE_HUMIDITY),
            relative_humidity: row.optional_float(RELATIVE_HUMIDITY),
            wind_direction: row.optional_float(WIND_DIRECTION),
            max_wind_gust: row.optional_float(MAX_WIND_GUST),
            wind_speed: row.optional_float(WIND_SPEED),
        }
    }
}
