//! `$GPRMC` sentence decoding
//!
//! RMC ("Recommended Minimum") is the only sentence variant that carries a
//! date, so it is the one trusted for trajectory timestamps. Decoding
//! reconstructs a full date-time from the `HHMMSS[.ss]` time field and the
//! `DDMMYY` date field, then derives epoch seconds with the day-rollover
//! heuristic described on [`decode_rmc`].

use crate::error::{NmeaError, Result};
use crate::parser::coordinate::{parse_altitude, parse_latitude, parse_longitude};
use crate::types::RmcFix;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Leading tag of an RMC sentence
pub const RMC_TAG: &str = "$GPRMC";

/// Comma-separated fields an RMC sentence unpacks into: tag, UTC time,
/// status, latitude, N/S, longitude, E/W, speed, bearing, date, altitude,
/// magnetic variation, checksum
pub const RMC_FIELD_COUNT: usize = 13;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parse a `HHMMSS[.ss]` field; fractional seconds are truncated
pub fn parse_utc_time(raw: &str) -> Result<NaiveTime> {
    let whole = raw.split('.').next().unwrap_or(raw);
    NaiveTime::parse_from_str(whole, "%H%M%S")
        .map_err(|_| NmeaError::InvalidTimestamp(format!("time field {:?}", raw)))
}

/// Parse a `DDMMYY` date field with a fixed `20YY` century window
pub fn parse_utc_date(raw: &str) -> Result<NaiveDate> {
    let invalid = || NmeaError::InvalidTimestamp(format!("date field {:?}", raw));

    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let day: u32 = raw.get(0..2).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    let month: u32 = raw.get(2..4).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    let year: i32 = raw.get(4..6).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(invalid)
}

/// Decode one tokenized RMC sentence
///
/// The day-rollover heuristic: a receiver in a western (negative) UTC
/// offset logging around local midnight writes a UTC date that has already
/// advanced to the next calendar day. When the reconstructed hour is less
/// than `abs(utc_offset)`, one day of seconds is added to the derived
/// epoch value. The wall-clock fields are kept exactly as parsed; only the
/// epoch shifts. This is a heuristic comparison against the offset in
/// whole hours, not a timezone conversion.
///
/// # Arguments
/// * `fields` - the tokenized sentence, tag included
/// * `utc_offset` - configured receiver offset in hours, non-positive
///
/// # Returns
/// The decoded fix, or the first decode failure encountered
pub fn decode_rmc(fields: &[&str], utc_offset: f64) -> Result<RmcFix> {
    if fields.len() != RMC_FIELD_COUNT {
        return Err(NmeaError::MalformedSentence(format!(
            "expected {} fields for RMC, got {}",
            RMC_FIELD_COUNT,
            fields.len()
        )));
    }
    if fields[0] != RMC_TAG {
        return Err(NmeaError::MalformedSentence(format!(
            "expected leading tag {}, got {:?}",
            RMC_TAG, fields[0]
        )));
    }

    let latitude = parse_latitude(fields[3], fields[4])?;
    let longitude = parse_longitude(fields[5], fields[6])?;

    let time = parse_utc_time(fields[1])?;
    let date = parse_utc_date(fields[9])?;
    let time_of_fix = NaiveDateTime::new(date, time);

    let mut epoch_seconds = time_of_fix.and_utc().timestamp() as f64;
    if (time_of_fix.hour() as f64) < utc_offset.abs() {
        epoch_seconds += SECONDS_PER_DAY;
    }

    let altitude = parse_altitude(fields[10])?;

    Ok(RmcFix {
        latitude,
        longitude,
        altitude,
        time_of_fix,
        epoch_seconds,
    })
}
