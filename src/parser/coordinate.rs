//! Geodetic coordinate decoding
//!
//! NMEA encodes latitude as "DDMM.MMMM" and longitude as "DDDMM.MMMM"
//! (degrees and decimal minutes), with the hemisphere carried in a separate
//! single-letter field. Decoding converts to signed decimal degrees, east
//! and north positive.

use crate::error::{NmeaError, Result};

/// Largest legal absolute latitude in decimal degrees
pub const ABS_MAX_LATITUDE: f64 = 90.0;
/// Largest legal absolute longitude in decimal degrees
pub const ABS_MAX_LONGITUDE: f64 = 180.0;

/// Cardinal hemisphere letter attached to a coordinate field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Decode the one-letter hemisphere field; anything else is rejected
    pub fn from_field(field: &str) -> Result<Self> {
        match field {
            "N" => Ok(Hemisphere::North),
            "S" => Ok(Hemisphere::South),
            "E" => Ok(Hemisphere::East),
            "W" => Ok(Hemisphere::West),
            other => Err(NmeaError::InvalidHemisphere(format!(
                "expected N, S, E or W, got {:?}",
                other
            ))),
        }
    }

    /// Sign the hemisphere applies to a converted coordinate
    pub fn sign(&self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }

    pub fn is_latitudinal(&self) -> bool {
        matches!(self, Hemisphere::North | Hemisphere::South)
    }
}

/// Convert a raw DMM value to decimal degrees
///
/// `degrees = floor(raw / 100)`, the remainder is decimal minutes.
fn dmm_to_decimal_degrees(raw: f64) -> f64 {
    let degrees = (raw / 100.0).floor();
    let minutes = raw - degrees * 100.0;
    degrees + minutes / 60.0
}

fn parse_coordinate(
    raw: &str,
    hemisphere: Hemisphere,
    abs_max: f64,
    field_name: &str,
) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| {
        NmeaError::InvalidNumericField(format!("{} field {:?} is not a number", field_name, raw))
    })?;

    let decimal_degrees = hemisphere.sign() * dmm_to_decimal_degrees(value);

    if decimal_degrees.abs() > abs_max || !decimal_degrees.is_finite() {
        return Err(NmeaError::InvalidNumericField(format!(
            "{} {} exceeds +/-{} degrees",
            field_name, decimal_degrees, abs_max
        )));
    }

    Ok(decimal_degrees)
}

/// Decode a latitude value/hemisphere field pair to signed decimal degrees
pub fn parse_latitude(raw: &str, hemisphere_field: &str) -> Result<f64> {
    let hemisphere = Hemisphere::from_field(hemisphere_field)?;
    if !hemisphere.is_latitudinal() {
        return Err(NmeaError::InvalidHemisphere(format!(
            "latitude takes N or S, got {:?}",
            hemisphere_field
        )));
    }
    parse_coordinate(raw, hemisphere, ABS_MAX_LATITUDE, "latitude")
}

/// Decode a longitude value/hemisphere field pair to signed decimal degrees
pub fn parse_longitude(raw: &str, hemisphere_field: &str) -> Result<f64> {
    let hemisphere = Hemisphere::from_field(hemisphere_field)?;
    if hemisphere.is_latitudinal() {
        return Err(NmeaError::InvalidHemisphere(format!(
            "longitude takes E or W, got {:?}",
            hemisphere_field
        )));
    }
    parse_coordinate(raw, hemisphere, ABS_MAX_LONGITUDE, "longitude")
}

/// Parse an optional altitude field; empty means absent
pub fn parse_altitude(raw: &str) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|_| {
        NmeaError::InvalidNumericField(format!("altitude field {:?} is not a number", raw))
    })
}
