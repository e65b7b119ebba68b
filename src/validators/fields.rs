use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// A single field's raw value cannot be coerced to its target type.
///
/// Always recovered by the row validator into a row-level rejection;
/// never crashes a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FormatError(pub String);

/// Parse a decimal-comma number ("888,1" -> 888.1).
///
/// Values already using a point decimal separator parse unchanged, so
/// applying the rule to an already-coerced value is a no-op.
pub fn parse_decimal_comma(s: &str) -> Result<f64, FormatError> {
    let normalized = s.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .map_err(|_| FormatError(format!("not a number: '{}'", s)))
}

/// Try each date format in order and return the first successful parse.
///
/// A parse only counts when formatting the result back reproduces the
/// input, so "07/05/00" is not swallowed by `%d/%m/%Y` as year 0 and
/// falls through to the two-digit-year format.
pub fn parse_date(s: &str, formats: &[&str]) -> Result<NaiveDate, FormatError> {
    let trimmed = s.trim();
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if date.format(format).to_string() == trimmed {
                return Ok(date);
            }
        }
    }
    Err(FormatError(format!("invalid date: '{}'", s)))
}

/// Parse an INMET observation time of the form "HHMM UTC".
pub fn parse_utc_time(s: &str) -> Result<NaiveTime, FormatError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_suffix(" UTC")
        .filter(|d| d.len() == 4 && d.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(|| FormatError(format!("invalid UTC time: '{}'", s)))?;

    let hour: u32 = digits[..2]
        .parse()
        .map_err(|_| FormatError(format!("invalid UTC time: '{}'", s)))?;
    let minute: u32 = digits[2..]
        .parse()
        .map_err(|_| FormatError(format!("invalid UTC time: '{}'", s)))?;

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| FormatError(format!("invalid UTC time: '{}'", s)))
}

/// Coerce an optional non-negative measurement.
///
/// Empty input is absent; a parsed negative value is forced to absent
/// rather than rejected; a non-numeric value is a format error.
pub fn clamp_or_absent(s: &str) -> Result<Option<f64>, FormatError> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    let value = parse_decimal_comma(s)?;
    if value < 0.0 {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

/// Coerce an optional signed measurement (temperature-class fields).
///
/// Negative values are preserved and malformed input degrades to absent
/// instead of rejecting the row.
pub fn parse_signed_or_absent(s: &str) -> Option<f64> {
    if s.trim().is_empty() {
        return None;
    }
    parse_decimal_comma(s).ok()
}

/// Coerce a WMO station identifier: 4 characters, one uppercase letter
/// followed by three digits. Input is upper-cased before the check.
pub fn parse_station_id(s: &str) -> Result<String, FormatError> {
    let upper = s.trim().to_uppercase();
    let bytes = upper.as_bytes();
    let well_formed = bytes.len() == 4
        && bytes[0].is_ascii_uppercase()
        && bytes[1..].iter().all(u8::is_ascii_digit);

    if well_formed {
        Ok(upper)
    } else {
        Err(FormatError(format!("invalid station id: '{}'", s)))
    }
}

/// Upper-case a free-text identity field.
pub fn uppercase_text(s: &str) -> String {
    s.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal_comma("888,1").unwrap(), 888.1);
        assert_eq!(parse_decimal_comma("1160,96").unwrap(), 1160.96);
        assert_eq!(parse_decimal_comma("-19,3").unwrap(), -19.3);
        // Already-coerced values pass through unchanged
        assert_eq!(parse_decimal_comma("888.1").unwrap(), 888.1);
        assert!(parse_decimal_comma("aaaaaaaaaa").is_err());
    }

    #[test]
    fn test_parse_date_format_precedence() {
        let formats = ["%d/%m/%Y", "%d/%m/%y"];
        assert_eq!(
            parse_date("19/07/2020", &formats).unwrap(),
            NaiveDate::from_ymd_opt(2020, 7, 19).unwrap()
        );
        assert_eq!(
            parse_date("07/05/00", &formats).unwrap(),
            NaiveDate::from_ymd_opt(2000, 5, 7).unwrap()
        );
        assert!(parse_date("2000-05-07", &formats).is_err());
    }

    #[test]
    fn test_parse_date_weather_format() {
        let formats = ["%Y/%m/%d"];
        assert_eq!(
            parse_date("2020/01/15", &formats).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
        );
        assert!(parse_date("15/01/2020", &formats).is_err());
    }

    #[test]
    fn test_parse_utc_time() {
        assert_eq!(
            parse_utc_time("0100 UTC").unwrap(),
            NaiveTime::from_hms_opt(1, 0, 0).unwrap()
        );
        assert_eq!(
            parse_utc_time("2300 UTC").unwrap(),
            NaiveTime::from_hms_opt(23, 0, 0).unwrap()
        );
        assert!(parse_utc_time("").is_err());
        assert!(parse_utc_time("0100").is_err());
        assert!(parse_utc_time("2500 UTC").is_err());
    }

    #[test]
    fn test_clamp_or_absent() {
        assert_eq!(clamp_or_absent("12,5").unwrap(), Some(12.5));
        assert_eq!(clamp_or_absent("-100").unwrap(), None);
        assert_eq!(clamp_or_absent("").unwrap(), None);
        assert_eq!(clamp_or_absent("  ").unwrap(), None);
        assert!(clamp_or_absent("abc").is_err());
    }

    #[test]
    fn test_parse_signed_or_absent() {
        assert_eq!(parse_signed_or_absent("-19,3"), Some(-19.3));
        assert_eq!(parse_signed_or_absent("25,0"), Some(25.0));
        assert_eq!(parse_signed_or_absent(""), None);
        // Malformed optional degrades to absent, it is not an error
        assert_eq!(parse_signed_or_absent("abc"), None);
    }

    #[test]
    fn test_parse_station_id() {
        assert_eq!(parse_station_id("A001").unwrap(), "A001");
        assert_eq!(parse_station_id("a001").unwrap(), "A001");
        assert!(parse_station_id("0A01").is_err());
        assert!(parse_station_id("A01").is_err());
        assert!(parse_station_id("A0011").is_err());
        assert!(parse_station_id("").is_err());
    }
}
