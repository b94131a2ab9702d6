//! Track assembly from raw NMEA lines
//!
//! The assembler walks a finite line sequence, decodes each sentence, and
//! keeps the RMC fixes as projected `(x, y, t)` samples in input order.
//! NMEA logs are monotonic in time by construction, so no re-sorting
//! happens. GGA fixes decode fully but are excluded from sampling by
//! policy: they carry no date, so their timestamps cannot anchor a
//! trajectory.

use crate::analysis::DEFAULT_SPEED_THRESHOLD;
use crate::error::{NmeaError, Result};
use crate::parser::sentence::decode_sentence;
use crate::project::Projector;
use crate::types::{GpsFix, RmcFix, Track};
use std::path::Path;

/// What to do when one line fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeFailurePolicy {
    /// Record the failure in the skipped-line report and keep going
    #[default]
    Skip,
    /// Abort the whole pass on the first failure
    FailFast,
}

/// Options for one track-processing pass
#[derive(Debug, Clone)]
pub struct TrackConfig {
    /// Receiver UTC offset in hours; must be non-positive
    pub utc_offset: f64,
    /// Dwell threshold in projected units per second; must be positive
    pub speed_threshold: f64,
    /// Visual scale for dwell circles, not part of the analysis
    pub dwell_circle_scale: f64,
    pub decode_failure_policy: DecodeFailurePolicy,
    /// Close an open dwell at end of track instead of dropping it
    pub flush_trailing_dwell: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            utc_offset: -8.0,
            speed_threshold: DEFAULT_SPEED_THRESHOLD,
            dwell_circle_scale: 5.0,
            decode_failure_policy: DecodeFailurePolicy::Skip,
            flush_trailing_dwell: false,
        }
    }
}

impl TrackConfig {
    /// Reject configurations that would corrupt every timestamp or scan
    ///
    /// Raised once before any decoding; the rollover heuristic is only
    /// meaningful for non-positive offsets.
    pub fn validate(&self) -> Result<()> {
        if self.utc_offset > 0.0 {
            return Err(NmeaError::Configuration(format!(
                "UTC offset must be non-positive, got {}",
                self.utc_offset
            )));
        }
        if !(self.speed_threshold > 0.0) {
            return Err(NmeaError::Configuration(format!(
                "speed threshold must be positive, got {}",
                self.speed_threshold
            )));
        }
        Ok(())
    }
}

/// Assemble one track from an ordered sequence of raw lines
///
/// Empty lines are skipped outright. Decode failures follow the
/// configured policy; under [`DecodeFailurePolicy::Skip`] they land in
/// the track's skipped-line report and processing continues.
///
/// # Arguments
/// * `lines` - the raw sentence lines, in receiver order
/// * `config` - validated before the first line is touched
/// * `projector` - planar projection applied to each accepted fix
pub fn assemble_track<I, S, P>(lines: I, config: &TrackConfig, projector: &P) -> Result<Track>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: Projector + ?Sized,
{
    config.validate()?;

    let mut track = Track::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        match decode_sentence(line, config.utc_offset) {
            Ok(GpsFix::Rmc(fix)) => {
                let (x, y) = projector.project(fix.longitude, fix.latitude);
                track.push_sample(x, y, fix.epoch_seconds);
            }
            Ok(GpsFix::Gga(_)) => {
                track.gga_ignored += 1;
            }
            Err(err) => match config.decode_failure_policy {
                DecodeFailurePolicy::Skip => track.skipped.record(index + 1, &err),
                DecodeFailurePolicy::FailFast => return Err(err),
            },
        }
    }

    Ok(track)
}

/// Read one NMEA log file and assemble its track
pub fn parse_nmea_file<P>(path: &Path, config: &TrackConfig, projector: &P) -> Result<Track>
where
    P: Projector + ?Sized,
{
    let content = std::fs::read_to_string(path)?;
    assemble_track(content.lines(), config, projector)
}

/// Scan a file for the first decodable RMC fix, e.g. to anchor a projection
pub fn first_rmc_fix(path: &Path, config: &TrackConfig) -> Result<Option<RmcFix>> {
    config.validate()?;

    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(GpsFix::Rmc(fix)) = decode_sentence(line, config.utc_offset) {
            return Ok(Some(fix));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rmc_line(utc: &str, lat: &str, ns: &str, lon: &str, ew: &str) -> String {
        format!(
            "$GPRMC,{},A,{},{},{},{},000.0,360.0,130210,114.2,011.3,E*62",
            utc, lat, ns, lon, ew
        )
    }

    fn gga_line(utc: &str) -> String {
        format!("$GPGGA,{},4724.50,N,12225.10,W,1,05,1.5,280.2,M,-34.0,M,,*75", utc)
    }

    fn identity() -> impl Projector {
        |lon: f64, lat: f64| (lon, lat)
    }

    #[test]
    fn test_assembles_samples_in_input_order() {
        let lines = vec![
            rmc_line("100000", "4724.50", "N", "12225.10", "W"),
            rmc_line("100001", "4724.51", "N", "12225.11", "W"),
            rmc_line("100002", "4724.52", "N", "12225.12", "W"),
        ];
        let track = assemble_track(&lines, &TrackConfig::default(), &identity()).unwrap();
        assert_eq!(track.sample_count(), 3);
        assert!(track.samples[0].t < track.samples[1].t);
        assert!(track.samples[1].t < track.samples[2].t);
        assert_eq!(track.duration_seconds(), 2.0);
    }

    #[test]
    fn test_gga_decodes_but_never_samples() {
        let lines = vec![
            gga_line("100000"),
            rmc_line("100000", "4724.50", "N", "12225.10", "W"),
            gga_line("100001"),
            rmc_line("100001", "4724.51", "N", "12225.10", "W"),
        ];
        let track = assemble_track(&lines, &TrackConfig::default(), &identity()).unwrap();
        assert_eq!(track.sample_count(), 2);
        assert_eq!(track.gga_ignored, 2);
        assert!(track.skipped.is_empty());
    }

    #[test]
    fn test_bounding_box_covers_every_sample() {
        let lines = vec![
            rmc_line("100000", "4724.50", "N", "12225.10", "W"),
            rmc_line("100001", "4730.00", "N", "12220.00", "W"),
            rmc_line("100002", "4720.00", "N", "12230.00", "W"),
        ];
        let track = assemble_track(&lines, &TrackConfig::default(), &identity()).unwrap();
        assert!(!track.bounds.is_empty());
        for sample in &track.samples {
            assert!(track.bounds.contains(sample.x, sample.y));
        }
    }

    #[test]
    fn test_projector_output_is_sampled() {
        let lines = vec![rmc_line("100000", "4724.50", "N", "12225.10", "W")];
        let flipped = |lon: f64, lat: f64| (lat, lon);
        let track = assemble_track(&lines, &TrackConfig::default(), &flipped).unwrap();
        assert!(track.samples[0].x > 0.0); // latitude landed in x
        assert!(track.samples[0].y < 0.0); // west longitude landed in y
    }

    #[test]
    fn test_skip_policy_records_and_continues() {
        let lines = vec![
            rmc_line("100000", "4724.50", "N", "12225.10", "W"),
            // One field short of the RMC schema
            "$GPRMC,100001,A,4724.50,N,12225.10,W,000.0,360.0,130210,114.2,E*62".to_string(),
            rmc_line("100002", "4724.50", "X", "12225.10", "W"),
            "$GPGSV,3,1,11,03,03,111,00*74".to_string(),
            rmc_line("100003", "4724.52", "N", "12225.12", "W"),
        ];
        let track = assemble_track(&lines, &TrackConfig::default(), &identity()).unwrap();
        assert_eq!(track.sample_count(), 2);
        assert_eq!(track.skipped.total, 3);
        assert_eq!(track.skipped.by_kind.get("malformed sentence"), Some(&2));
        assert_eq!(track.skipped.by_kind.get("invalid hemisphere"), Some(&1));
        assert_eq!(track.skipped.samples[0].line_number, 2);
        assert!(track.skipped.summary().starts_with("Skipped 3"));
    }

    #[test]
    fn test_fail_fast_aborts_on_first_failure() {
        let lines = vec![
            rmc_line("100000", "4724.50", "N", "12225.10", "W"),
            rmc_line("100001", "4724.50", "X", "12225.10", "W"),
            rmc_line("100002", "4724.52", "N", "12225.12", "W"),
        ];
        let config = TrackConfig {
            decode_failure_policy: DecodeFailurePolicy::FailFast,
            ..TrackConfig::default()
        };
        let err = assemble_track(&lines, &config, &identity()).unwrap_err();
        assert!(matches!(err, NmeaError::InvalidHemisphere(_)));
    }

    #[test]
    fn test_empty_lines_are_not_errors() {
        let lines = vec![
            "".to_string(),
            rmc_line("100000", "4724.50", "N", "12225.10", "W"),
            "   ".to_string(),
            rmc_line("100001", "4724.51", "N", "12225.10", "W"),
        ];
        let track = assemble_track(&lines, &TrackConfig::default(), &identity()).unwrap();
        assert_eq!(track.sample_count(), 2);
        assert!(track.skipped.is_empty());
    }

    #[test]
    fn test_positive_utc_offset_refuses_to_start() {
        let config = TrackConfig {
            utc_offset: 3.0,
            ..TrackConfig::default()
        };
        let lines = vec![rmc_line("100000", "4724.50", "N", "12225.10", "W")];
        let err = assemble_track(&lines, &config, &identity()).unwrap_err();
        assert!(matches!(err, NmeaError::Configuration(_)));
    }

    #[test]
    fn test_non_positive_threshold_refused() {
        let config = TrackConfig {
            speed_threshold: 0.0,
            ..TrackConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            NmeaError::Configuration(_)
        ));
    }
}
