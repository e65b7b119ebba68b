use crate::models::{station, weather};

/// Coercion rule bound to a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Upper-cased free text.
    Uppercase,
    /// 4-character WMO identifier, `[A-Z]` then three digits.
    StationId,
    /// Decimal-comma float.
    DecimalComma,
    /// Calendar date, tried against an ordered list of formats.
    Date(&'static [&'static str]),
    /// "HHMM UTC" time of day.
    UtcTime,
    /// Optional measurement; negatives are dropped to absent.
    NonNegativeOrAbsent,
    /// Optional signed measurement; malformed input degrades to absent.
    SignedOrAbsent,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub coercion: Coercion,
}

/// A fixed, ordered record shape: an explicit association list of field
/// specifications instead of runtime dispatch.
#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub const STATION_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d/%m/%y"];
pub const WEATHER_DATE_FORMATS: &[&str] = &["%Y/%m/%d"];

const fn required(name: &'static str, coercion: Coercion) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
        coercion,
    }
}

const fn measurement(name: &'static str, coercion: Coercion) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        coercion,
    }
}

static STATION_SCHEMA: RecordSchema = RecordSchema {
    name: "stations",
    fields: &[
        required(station::REGION, Coercion::Uppercase),
        required(station::STATE, Coercion::Uppercase),
        required(station::STATION_NAME, Coercion::Uppercase),
        required(station::ID_STATION_WHO, Coercion::StationId),
        required(station::LATITUDE, Coercion::DecimalComma),
        required(station::LONGITUDE, Coercion::DecimalComma),
        required(station::ALTITUDE, Coercion::DecimalComma),
        required(station::FOUNDING_DATE, Coercion::Date(STATION_DATE_FORMATS)),
    ],
};

static WEATHER_SCHEMA: RecordSchema = RecordSchema {
    name: "weather",
    fields: &[
        required(station::ID_STATION_WHO, Coercion::StationId),
        required(weather::DATE, Coercion::Date(WEATHER_DATE_FORMATS)),
        required(weather::TIME, Coercion::UtcTime),
        measurement(weather::TOTAL_PRECIPITATION, Coercion::NonNegativeOrAbsent),
        measurement(weather::ATMOSPHERIC_PRESSURE, Coercion::NonNegativeOrAbsent),
        measurement(
            weather::MAX_ATMOSPHERIC_PRESSURE,
            Coercion::NonNegativeOrAbsent,
        ),
        measurement(
            weather::MIN_ATMOSPHERIC_PRESSURE,
            Coercion::NonNegativeOrAbsent,
        ),
        measurement(weather::GLOBAL_RADIATION, Coercion::NonNegativeOrAbsent),
        measurement(weather::DRY_BULB_TEMPERATURE, Coercion::SignedOrAbsent),
        measurement(weather::DEW_POINT_TEMPERATURE, Coercion::SignedOrAbsent),
        measurement(weather::MAX_TEMPERATURE, Coercion::SignedOrAbsent),
        measurement(weather::MIN_TEMPERATURE, Coercion::SignedOrAbsent),
        measurement(weather::MAX_DEW_POINT_TEMPERATURE, Coercion::SignedOrAbsent),
        measurement(weather::MIN_DEW_POINT_TEMPERATURE, Coercion::SignedOrAbsent),
        measurement(weather::MAX_RELATIVE_HUMIDITY, Coercion::NonNegativeOrAbsent),
        measurement(weather::MIN_RELATIVE_HUMIDITY, Coercion::NonNegativeOrAbsent),
        measurement(weather::RELATIVE_HUMIDITY, Coercion::NonNegativeOrAbsent),
        measurement(weather::WIND_DIRECTION, Coercion::NonNegativeOrAbsent),
        measurement(weather::MAX_WIND_GUST, Coercion::NonNegativeOrAbsent),
        measurement(weather::WIND_SPEED, Coercion::NonNegativeOrAbsent),
    ],
};

pub fn station_schema() -> &'static RecordSchema {
    &STATION_SCHEMA
}

pub fn weather_schema() -> &'static RecordSchema {
    &WEATHER_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_schema_shape() {
        let schema = station_schema();
        assert_eq!(schema.fields.len(), 8);
        assert!(schema.fields.iter().all(|f| f.required));
        assert_eq!(
            schema.field(station::ID_STATION_WHO).unwrap().coercion,
            Coercion::StationId
        );
    }

    #[test]
    fn test_weather_schema_shape() {
        let schema = weather_schema();
        assert_eq!(schema.fields.len(), 20);
        assert_eq!(
            schema.fields.iter().filter(|f| f.required).count(),
            3,
            "only station id, date and time are required"
        );
        // Temperature-class fields keep their sign
        for name in [
            weather::DRY_BULB_TEMPERATURE,
            weather::DEW_POINT_TEMPERATURE,
            weather::MAX_TEMPERATURE,
            weather::MIN_TEMPERATURE,
            weather::MAX_DEW_POINT_TEMPERATURE,
            weather::MIN_DEW_POINT_TEMPERATURE,
        ] {
            assert_eq!(
                schema.field(name).unwrap().coercion,
                Coercion::SignedOrAbsent
            );
        }
    }

    #[test]
    fn test_rename_targets_are_schema_fields() {
        for (_, renamed) in weather::COLUMN_RENAMES {
            assert!(
                weather_schema().field(renamed).is_some(),
                "rename target '{}' missing from weather schema",
                renamed
            );
        }
        for (_, renamed) in station::COLUMN_RENAMES {
            assert!(
                station_schema().field(renamed).is_some(),
                "rename target '{}' missing from station schema",
                renamed
            );
        }
    }
}
