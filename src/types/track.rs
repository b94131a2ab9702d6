use crate::error::NmeaError;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One projected track point: planar position plus epoch seconds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackSample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

/// Axis-aligned bounds, widened monotonically as samples arrive
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Widen the box to cover one more point
    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Widen the box to cover another box, e.g. when merging per-file tracks
    pub fn merge(&mut self, other: &BoundingBox) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// True until the first point has been included
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// One detected stationary interval
///
/// `start` and `duration` are epoch seconds; `(x, y)` is the projected
/// position of the last slow sample, where a wait circle belongs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DwellEvent {
    pub start: f64,
    pub duration: f64,
    pub x: f64,
    pub y: f64,
}

/// One line rejected by the decoder, kept for the per-file report
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedLine {
    pub line_number: usize,
    pub error: String,
}

/// Aggregate of lines rejected under the skip policy
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedLines {
    pub total: u32,
    pub by_kind: HashMap<String, u32>,
    pub samples: Vec<SkippedLine>,
}

impl SkippedLines {
    // Detail lines kept beyond the counters; enough to locate a bad logger
    const MAX_DETAIL_LINES: usize = 10;

    pub fn record(&mut self, line_number: usize, error: &NmeaError) {
        self.total += 1;
        *self.by_kind.entry(error.kind().to_string()).or_insert(0) += 1;
        if self.samples.len() < Self::MAX_DETAIL_LINES {
            self.samples.push(SkippedLine {
                line_number,
                error: error.to_string(),
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Multi-line human-readable report, empty string when nothing was skipped
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut kinds: Vec<(&String, &u32)> = self.by_kind.iter().collect();
        kinds.sort();

        let mut out = format!("Skipped {} line(s):", self.total);
        for (kind, count) in kinds {
            out.push_str(&format!("\n  {}: {}", kind, count));
        }
        for sample in &self.samples {
            out.push_str(&format!("\n  line {}: {}", sample.line_number, sample.error));
        }
        if (self.total as usize) > self.samples.len() {
            out.push_str(&format!(
                "\n  ... and {} more",
                self.total as usize - self.samples.len()
            ));
        }
        out
    }
}

/// Assembled track for one input file
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    pub samples: Vec<TrackSample>,
    pub bounds: BoundingBox,
    pub skipped: SkippedLines,
    pub gga_ignored: u32,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample and widen the bounds to cover it
    pub fn push_sample(&mut self, x: f64, y: f64, t: f64) {
        self.bounds.include(x, y);
        self.samples.push(TrackSample { x, y, t });
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn has_samples(&self) -> bool {
        !self.samples.is_empty()
    }

    /// Elapsed time between the first and last sample, 0 for short tracks
    pub fn duration_seconds(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.t - first.t,
            _ => 0.0,
        }
    }
}
