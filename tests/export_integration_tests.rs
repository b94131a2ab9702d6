//! Integration tests for export functionality
//!
//! Tests the export layer across different scenarios:
//! - CSV export with directory creation
//! - Dwell JSON lines format
//! - Empty dwell lists producing no file
//! - Output paths defaulting to the input's directory

use nmea_timemap::export::*;
use nmea_timemap::{DwellEvent, Track};
use std::fs;
use tempfile::TempDir;

fn two_sample_track() -> Track {
    let mut track = Track::new();
    track.push_sample(0.0, 0.0, 1000.0);
    track.push_sample(12.5, -3.25, 1001.0);
    track
}

#[cfg(feature = "csv")]
#[test]
fn test_export_csv_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nonexistent_dir = temp_dir.path().join("nonexistent").join("output");
    let input_path = temp_dir.path().join("ride.nmea");

    let options = ExportOptions {
        csv: true,
        dwells: false,
        output_dir: Some(nonexistent_dir.to_str().unwrap().to_string()),
    };

    let result = export_track_csv(&two_sample_track(), &input_path, &options);
    assert!(
        result.is_ok(),
        "CSV export should succeed and create directories"
    );

    // Verify output directory was created
    assert!(
        nonexistent_dir.exists(),
        "Output directory should be created"
    );

    // Verify CSV file and content
    let csv_path = nonexistent_dir.join("ride.track.csv");
    assert!(csv_path.exists(), "CSV file should be created in new directory");

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3, "Header plus one row per sample");
    assert_eq!(lines[0], "x,y,epoch_seconds");
    assert_eq!(lines[1], "0,0,1000");
    assert_eq!(lines[2], "12.5,-3.25,1001");
}

#[test]
fn test_export_dwells_json_lines_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("ride.nmea");

    let dwells = vec![
        DwellEvent {
            start: 1000.0,
            duration: 30.0,
            x: 12.5,
            y: -3.0,
        },
        DwellEvent {
            start: 1200.0,
            duration: 4.5,
            x: 13.0,
            y: -2.5,
        },
    ];

    let options = ExportOptions {
        csv: false,
        dwells: true,
        output_dir: Some(temp_dir.path().to_str().unwrap().to_string()),
    };

    let json_path =
        export_dwells_json(&dwells, &input_path, &options).expect("Dwell export should succeed");
    assert!(json_path.exists(), "Dwell file should be created");

    // Verify one JSON object per line
    let content = fs::read_to_string(&json_path).expect("Failed to read dwell file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2, "One line per dwell event");
    assert_eq!(lines[0], r#"{"start":1000, "duration":30, "x":12.5, "y":-3}"#);
    assert_eq!(lines[1], r#"{"start":1200, "duration":4.5, "x":13, "y":-2.5}"#);
}

#[test]
fn test_export_dwells_empty_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("ride.nmea");

    let options = ExportOptions {
        csv: false,
        dwells: true,
        output_dir: Some(temp_dir.path().to_str().unwrap().to_string()),
    };

    let result = export_dwells_json(&[], &input_path, &options);
    assert!(result.is_ok(), "Dwell export should succeed with no events");

    // Verify no dwell file created
    let json_path = temp_dir.path().join("ride.dwell.json");
    assert!(
        !json_path.exists(),
        "No dwell file should be created for an empty event list"
    );
}

#[test]
fn test_export_defaults_to_input_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("ride.nmea");

    let dwells = vec![DwellEvent {
        start: 0.0,
        duration: 1.0,
        x: 0.0,
        y: 0.0,
    }];

    let json_path = export_dwells_json(&dwells, &input_path, &ExportOptions::default())
        .expect("Dwell export should succeed");
    assert_eq!(json_path, temp_dir.path().join("ride.dwell.json"));
    assert!(
        json_path.exists(),
        "Dwell file should land next to the input file"
    );
}

#[test]
fn test_export_options_defaults() {
    let opts = ExportOptions::default();
    assert!(!opts.csv, "Default CSV should be false");
    assert!(!opts.dwells, "Default dwells should be false");
    assert!(
        opts.output_dir.is_none(),
        "Default output_dir should be None"
    );
}

#[cfg(feature = "json")]
#[test]
fn test_export_track_report_is_valid_json() {
    use nmea_timemap::analyze;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("ride.nmea");

    let track = two_sample_track();
    let analysis = analyze(&track.samples, 1.5, false);

    let options = ExportOptions {
        csv: false,
        dwells: false,
        output_dir: Some(temp_dir.path().to_str().unwrap().to_string()),
    };

    let report_path = export_track_report_json(&track, &analysis, &input_path, &options)
        .expect("Report export should succeed");
    assert!(report_path.exists(), "Report file should be created");

    let content = fs::read_to_string(&report_path).expect("Failed to read report");
    let value: serde_json::Value =
        serde_json::from_str(&content).expect("Report should be valid JSON");
    assert!(value.get("track").is_some(), "Report should carry the track");
    assert!(
        value.get("analysis").is_some(),
        "Report should carry the analysis"
    );

    // Two samples one second apart, 12.5 across and 3.25 down
    let speed = value["analysis"]["speeds"][0]
        .as_f64()
        .expect("Speed should be a number");
    assert!((speed - 12.915_6).abs() < 1e-3);
}
