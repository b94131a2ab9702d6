use chrono::{NaiveDateTime, NaiveTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoded fix from a `$GPRMC` sentence
///
/// Carries a fully qualified date-time. `time_of_fix` holds the wall-clock
/// value exactly as reconstructed from the sentence fields; `epoch_seconds`
/// is the derived timestamp, including the day-rollover adjustment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RmcFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub time_of_fix: NaiveDateTime,
    pub epoch_seconds: f64,
}

/// Raw GGA quality fields, retained but not interpreted
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GgaQuality {
    pub fix_quality: String,
    pub satellites_in_use: String,
    pub horizontal_dilution: String,
}

/// Decoded fix from a `$GPGGA` sentence
///
/// GGA sentences carry no date, so the timestamp is a bare time of day and
/// the fix is treated as secondary: available to callers, never sampled
/// into a track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GgaFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub time_of_day: NaiveTime,
    pub quality: GgaQuality,
}

/// One decoded fix-bearing sentence, tagged by variant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GpsFix {
    Rmc(RmcFix),
    Gga(GgaFix),
}

impl GpsFix {
    pub fn latitude(&self) -> f64 {
        match self {
            GpsFix::Rmc(fix) => fix.latitude,
            GpsFix::Gga(fix) => fix.latitude,
        }
    }

    pub fn longitude(&self) -> f64 {
        match self {
            GpsFix::Rmc(fix) => fix.longitude,
            GpsFix::Gga(fix) => fix.longitude,
        }
    }

    pub fn altitude(&self) -> Option<f64> {
        match self {
            GpsFix::Rmc(fix) => fix.altitude,
            GpsFix::Gga(fix) => fix.altitude,
        }
    }

    /// Epoch seconds for fixes that carry a full date-time
    pub fn epoch_seconds(&self) -> Option<f64> {
        match self {
            GpsFix::Rmc(fix) => Some(fix.epoch_seconds),
            GpsFix::Gga(_) => None,
        }
    }

    pub fn is_rmc(&self) -> bool {
        matches!(self, GpsFix::Rmc(_))
    }
}
