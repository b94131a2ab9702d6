//! Export functionality for assembled tracks
//!
//! Contains functions for exporting track samples and dwell events to
//! CSV and JSON files alongside the rendered map.

use crate::error::{NmeaError, Result};
use crate::types::{DwellEvent, Track};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "json")]
use crate::analysis::TrackAnalysis;
#[cfg(feature = "json")]
use serde::Serialize;

/// Export options for controlling output artifacts
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Write track samples to a `.track.csv` file
    pub csv: bool,
    /// Write dwell events to a `.dwell.json` file (JSON lines)
    pub dwells: bool,
    /// Directory for output files (default: same as input file)
    pub output_dir: Option<String>,
}

/// Compute the output path for one artifact next to the input file
///
/// The input's stem is kept and the artifact extension appended, e.g.
/// `rides/00003.nmea` with extension `track.csv` becomes
/// `rides/00003.track.csv`, honoring `output_dir` when set.
pub fn compute_export_path(
    input_path: &Path,
    extension: &str,
    options: &ExportOptions,
) -> PathBuf {
    let base_name = input_path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("track");

    let output_dir = match options.output_dir.as_deref() {
        Some(dir) => Path::new(dir).to_path_buf(),
        None => input_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf(),
    };

    output_dir.join(format!("{}.{}", base_name, extension))
}

fn ensure_output_dir(options: &ExportOptions) -> Result<()> {
    if let Some(dir) = options.output_dir.as_deref() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Export track samples to CSV
#[cfg(feature = "csv")]
pub fn export_track_csv(
    track: &Track,
    input_path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf> {
    ensure_output_dir(options)?;
    let csv_path = compute_export_path(input_path, "track.csv", options);

    let mut writer = csv::Writer::from_path(&csv_path)
        .map_err(|e| NmeaError::Export(format!("failed to create {:?}: {}", csv_path, e)))?;

    writer
        .write_record(["x", "y", "epoch_seconds"])
        .map_err(|e| NmeaError::Export(e.to_string()))?;
    for sample in &track.samples {
        writer
            .write_record([
                sample.x.to_string(),
                sample.y.to_string(),
                sample.t.to_string(),
            ])
            .map_err(|e| NmeaError::Export(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| NmeaError::Export(e.to_string()))?;

    println!("Exported track samples to: {}", csv_path.display());
    Ok(csv_path)
}

/// Export dwell events as JSON lines, one object per event
///
/// Nothing is written when the event list is empty.
pub fn export_dwells_json(
    dwells: &[DwellEvent],
    input_path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let json_path = compute_export_path(input_path, "dwell.json", options);
    if dwells.is_empty() {
        return Ok(json_path);
    }
    ensure_output_dir(options)?;

    let mut file = std::fs::File::create(&json_path)?;
    for dwell in dwells {
        writeln!(
            file,
            r#"{{"start":{}, "duration":{}, "x":{}, "y":{}}}"#,
            dwell.start, dwell.duration, dwell.x, dwell.y
        )?;
    }

    println!("Exported dwell events to: {}", json_path.display());
    Ok(json_path)
}

/// Whole-track report for serialization
#[cfg(feature = "json")]
#[derive(Serialize)]
struct TrackReport<'a> {
    track: &'a Track,
    analysis: &'a TrackAnalysis,
}

/// Export one track and its analysis as a single JSON document
#[cfg(feature = "json")]
pub fn export_track_report_json(
    track: &Track,
    analysis: &TrackAnalysis,
    input_path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf> {
    ensure_output_dir(options)?;
    let report_path = compute_export_path(input_path, "report.json", options);

    let file = std::fs::File::create(&report_path)?;
    serde_json::to_writer(file, &TrackReport { track, analysis })
        .map_err(|e| NmeaError::Export(format!("failed to write {:?}: {}", report_path, e)))?;

    println!("Exported track report to: {}", report_path.display());
    Ok(report_path)
}
