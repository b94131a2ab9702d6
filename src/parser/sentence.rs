//! Sentence tokenizing and tag dispatch

use crate::error::{NmeaError, Result};
use crate::parser::gga::{decode_gga, GGA_TAG};
use crate::parser::rmc::{decode_rmc, RMC_TAG};
use crate::types::GpsFix;

/// Split one raw line into its comma-delimited fields
///
/// Field content is taken as-is; field\[0\] is the sentence-type tag.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(',').collect()
}

/// Tokenize and decode one line, dispatching on the leading tag
///
/// Only the two fix-bearing sentence types are recognized; any other tag
/// is rejected rather than silently dropped, so that skip-policy reporting
/// sees it.
pub fn decode_sentence(line: &str, utc_offset: f64) -> Result<GpsFix> {
    let fields = tokenize(line);
    match fields.first().copied() {
        Some(RMC_TAG) => decode_rmc(&fields, utc_offset).map(GpsFix::Rmc),
        Some(GGA_TAG) => decode_gga(&fields).map(GpsFix::Gga),
        Some(other) => Err(NmeaError::MalformedSentence(format!(
            "unrecognized sentence tag {:?}",
            other
        ))),
        None => Err(NmeaError::MalformedSentence("empty line".to_string())),
    }
}
