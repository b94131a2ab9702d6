//! `$GPGGA` sentence decoding
//!
//! GGA shares the coordinate rules with RMC but carries only a time of
//! day, so its fixes are kept as secondary data and never become track
//! samples. The fix-quality block is retained as raw text.

use crate::error::{NmeaError, Result};
use crate::parser::coordinate::{parse_altitude, parse_latitude, parse_longitude};
use crate::parser::rmc::parse_utc_time;
use crate::types::{GgaFix, GgaQuality};

/// Leading tag of a GGA sentence
pub const GGA_TAG: &str = "$GPGGA";

/// Comma-separated fields a GGA sentence unpacks into: tag, UTC time,
/// latitude, N/S, longitude, E/W, quality, satellites in use, horizontal
/// dilution, altitude, altitude unit, geoidal separation, separation
/// unit, data age, reference station id
pub const GGA_FIELD_COUNT: usize = 15;

/// Decode one tokenized GGA sentence
pub fn decode_gga(fields: &[&str]) -> Result<GgaFix> {
    if fields.len() != GGA_FIELD_COUNT {
        return Err(NmeaError::MalformedSentence(format!(
            "expected {} fields for GGA, got {}",
            GGA_FIELD_COUNT,
            fields.len()
        )));
    }
    if fields[0] != GGA_TAG {
        return Err(NmeaError::MalformedSentence(format!(
            "expected leading tag {}, got {:?}",
            GGA_TAG, fields[0]
        )));
    }

    let latitude = parse_latitude(fields[2], fields[3])?;
    let longitude = parse_longitude(fields[4], fields[5])?;
    let time_of_day = parse_utc_time(fields[1])?;
    let altitude = parse_altitude(fields[9])?;

    Ok(GgaFix {
        latitude,
        longitude,
        altitude,
        time_of_day,
        quality: GgaQuality {
            fix_quality: fields[6].to_string(),
            satellites_in_use: fields[7].to_string(),
            horizontal_dilution: fields[8].to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    const EPSILON: f64 = 1e-9;

    fn sample_fields() -> Vec<&'static str> {
        vec![
            "$GPGGA",
            "081836",
            "4724.50",
            "N",
            "12225.10",
            "W",
            "1",
            "05",
            "1.5",
            "280.2",
            "M",
            "-34.0",
            "M",
            "",
            "*75",
        ]
    }

    #[test]
    fn test_decode_valid_sentence() {
        let fix = decode_gga(&sample_fields()).unwrap();
        assert!((fix.latitude - (47.0 + 24.50 / 60.0)).abs() < EPSILON);
        assert!((fix.longitude - -(122.0 + 25.10 / 60.0)).abs() < EPSILON);
        assert_eq!(fix.time_of_day, NaiveTime::from_hms_opt(8, 18, 36).unwrap());
        assert_eq!(fix.altitude, Some(280.2));
    }

    #[test]
    fn test_quality_block_kept_raw() {
        let fix = decode_gga(&sample_fields()).unwrap();
        assert_eq!(fix.quality.fix_quality, "1");
        assert_eq!(fix.quality.satellites_in_use, "05");
        assert_eq!(fix.quality.horizontal_dilution, "1.5");
    }

    #[test]
    fn test_short_sentence_is_malformed() {
        let mut fields = sample_fields();
        fields.pop();
        let err = decode_gga(&fields).unwrap_err();
        assert!(matches!(err, NmeaError::MalformedSentence(_)));
    }

    #[test]
    fn test_unknown_hemisphere_rejected() {
        let mut fields = sample_fields();
        fields[3] = "Q";
        let err = decode_gga(&fields).unwrap_err();
        assert!(matches!(err, NmeaError::InvalidHemisphere(_)));
    }

    #[test]
    fn test_bad_time_field() {
        let mut fields = sample_fields();
        fields[1] = "8am";
        let err = decode_gga(&fields).unwrap_err();
        assert!(matches!(err, NmeaError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_empty_altitude_is_absent() {
        let mut fields = sample_fields();
        fields[9] = "";
        let fix = decode_gga(&fields).unwrap();
        assert_eq!(fix.altitude, None);
    }
}
