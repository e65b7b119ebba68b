use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validators::row::CoercedRow;

/// Canonical column names of the stations table.
pub const REGION: &str = "Region";
pub const STATE: &str = "State";
pub const STATION_NAME: &str = "StationName";
pub const ID_STATION_WHO: &str = "IdStationWho";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const ALTITUDE: &str = "Altitude";
pub const FOUNDING_DATE: &str = "FoundingDate";

/// Rename table for the 8-line `LABEL:;VALUE` header block of an INMET file.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("REGIAO:", REGION),
    ("UF:", STATE),
    ("ESTACAO:", STATION_NAME),
    ("CODIGO (WMO):", ID_STATION_WHO),
    ("LATITUDE:", LATITUDE),
    ("LONGITUDE:", LONGITUDE),
    ("ALTITUDE:", ALTITUDE),
    ("DATA DE FUNDACAO:", FOUNDING_DATE),
];

/// A fixed weather-monitoring installation, keyed by its WMO identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Station {
    #[validate(length(min = 1, max = 2))]
    pub region: String,

    #[validate(length(min = 2, max = 2))]
    pub state: String,

    pub station_name: String,

    pub id_station_who: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub altitude: f64,

    pub founding_date: NaiveDate,
}

impl Station {
    /// Build a station from a fully coerced row.
    ///
    /// The row must have passed coercion against the station schema; a
    /// missing or mistyped field here is a programmer error and panics.
    pub fn from_coerced(row: &CoercedRow) -> Self {
        Self {
            region: row.text(REGION).to_string(),
            state: row.text(STATE).to_string(),
            station_name: row.text(STATION_NAME).to_string(),
            id_station_who: row.text(ID_STATION_WHO).to_string(),
            latitude: row.float(LATITUDE),
            longitude: row.float(LONGITUDE),
            altitude: row.float(ALTITUDE),
            founding_date: row.date(FOUNDING_DATE),
        }
    }
}
