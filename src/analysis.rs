//! Speed and dwell analysis over assembled tracks
//!
//! Works on consecutive sample pairs: each pair yields one instantaneous
//! speed, and a two-state scan over those segments finds the intervals
//! where the receiver sat still. A dwell opens when a segment drops below
//! the threshold and closes when a segment reaches it again; the closing
//! segment's span is not part of the dwell.

use crate::types::{DwellEvent, TrackSample};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default dwell threshold in projected units per second
pub const DEFAULT_SPEED_THRESHOLD: f64 = 1.5;

/// Per-segment speeds plus detected dwell events for one track
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackAnalysis {
    pub speeds: Vec<f64>,
    pub dwells: Vec<DwellEvent>,
}

/// Instantaneous speed over one consecutive sample pair
///
/// Zero elapsed time is degenerate input, not an error: the speed is
/// positive infinity, which can never sit below a finite threshold and
/// marks the segment as a render break.
pub fn segment_speed(p1: &TrackSample, p2: &TrackSample) -> f64 {
    let elapsed = p2.t - p1.t;
    if elapsed == 0.0 {
        return f64::INFINITY;
    }
    (p2.x - p1.x).hypot(p2.y - p1.y) / elapsed
}

/// Speeds for every consecutive pair, in order; empty for short tracks
pub fn segment_speeds(samples: &[TrackSample]) -> Vec<f64> {
    samples
        .windows(2)
        .map(|pair| segment_speed(&pair[0], &pair[1]))
        .collect()
}

/// Dwell scan state: either moving, or waiting since a start time
#[derive(Debug, Clone, Copy, PartialEq)]
enum DwellState {
    NotWaiting,
    Waiting { start: f64 },
}

/// Scan segments left to right and collect dwell events
///
/// A single dwell spans any number of consecutive slow segments. The
/// emitted duration runs from the dwell start to the moment motion
/// resumed, and the event is anchored at the last slow sample. Events
/// with a negative computed duration are discarded. An open dwell at end
/// of track is dropped unless `flush_trailing` closes it at the final
/// sample's timestamp.
pub fn detect_dwells(samples: &[TrackSample], threshold: f64, flush_trailing: bool) -> Vec<DwellEvent> {
    let mut events = Vec::new();
    let mut state = DwellState::NotWaiting;

    for pair in samples.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        let speed = segment_speed(p1, p2);

        state = match state {
            DwellState::NotWaiting if speed < threshold => DwellState::Waiting { start: p1.t },
            DwellState::Waiting { start } if speed >= threshold => {
                let duration = p1.t - start;
                if duration >= 0.0 {
                    events.push(DwellEvent {
                        start,
                        duration,
                        x: p1.x,
                        y: p1.y,
                    });
                }
                DwellState::NotWaiting
            }
            unchanged => unchanged,
        };
    }

    if flush_trailing {
        if let (DwellState::Waiting { start }, Some(last)) = (state, samples.last()) {
            let duration = last.t - start;
            if duration >= 0.0 {
                events.push(DwellEvent {
                    start,
                    duration,
                    x: last.x,
                    y: last.y,
                });
            }
        }
    }

    events
}

/// Run the full per-track analysis in one pass over the samples
pub fn analyze(samples: &[TrackSample], threshold: f64, flush_trailing: bool) -> TrackAnalysis {
    TrackAnalysis {
        speeds: segment_speeds(samples),
        dwells: detect_dwells(samples, threshold, flush_trailing),
    }
}
