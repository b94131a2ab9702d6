//! NMEA Timemap Library
//!
//! A Rust library for parsing NMEA-0183 GPS receiver logs and turning
//! them into analyzed, renderable tracks. Raw `$GPRMC`/`$GPGGA` sentences
//! are decoded into validated fixes, assembled into projected `(x, y, t)`
//! samples, scanned for per-segment speed and stationary "dwell"
//! intervals, and drawn onto a map through a pluggable renderer.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export of track samples
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable whole-track report export in JSON format
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a log file and inspect the assembled track:
//! ```rust,no_run
//! use nmea_timemap::{parse_nmea_file, EquirectangularProjection, TrackConfig};
//! use std::path::Path;
//!
//! let config = TrackConfig::default();
//! let projection = EquirectangularProjection::centered_on(47.4, -122.4);
//! let track = parse_nmea_file(Path::new("ride.nmea"), &config, &projection).unwrap();
//! println!("Assembled {} samples", track.sample_count());
//! println!("Skipped {} lines", track.skipped.total);
//! ```
//!
//! Analyze dwells and render an SVG map:
//! ```rust,no_run
//! use nmea_timemap::{
//!     analyze, draw_tracks, parse_nmea_file, EquirectangularProjection, RenderStyle,
//!     SvgRenderer, TrackConfig,
//! };
//! use std::path::Path;
//!
//! let config = TrackConfig::default();
//! let projection = EquirectangularProjection::centered_on(47.4, -122.4);
//! let track = parse_nmea_file(Path::new("ride.nmea"), &config, &projection).unwrap();
//!
//! let analysis = analyze(&track.samples, config.speed_threshold, config.flush_trailing_dwell);
//! println!("Found {} dwell events", analysis.dwells.len());
//!
//! let mut renderer = SvgRenderer::new(&track.bounds, 2000).unwrap();
//! renderer.background(255, 255, 255);
//! draw_tracks(&mut renderer, &[(&track, (0, 0, 0))], &config, &RenderStyle::default());
//! renderer.save(Path::new("map.svg")).unwrap();
//! ```
//!
//! # Public API
//!
//! ## Parsing and Assembly
//! - [`decode_sentence`] - Tokenize and decode one raw line
//! - [`decode_rmc`] / [`decode_gga`] - Per-variant sentence decoders
//! - [`assemble_track`] - Assemble a track from a line sequence
//! - [`parse_nmea_file`] - Read one log file and assemble its track
//! - [`first_rmc_fix`] - Scan a file for a fix to anchor a projection
//!
//! ## Data Types
//! - [`GpsFix`] / [`RmcFix`] / [`GgaFix`] - Decoded fixes
//! - [`Track`] - Samples, bounds, and skip report for one file
//! - [`TrackSample`] / [`BoundingBox`] / [`DwellEvent`]
//! - [`TrackConfig`] - Options for one processing pass
//!
//! ## Analysis
//! - [`segment_speeds`] / [`segment_speed`] - Per-segment speed
//! - [`detect_dwells`] - Two-state dwell scan
//! - [`analyze`] - Speeds and dwells in one call
//!
//! ## Rendering and Export
//! - [`MapRenderer`] - Primitive sink the drawing code talks to
//! - [`SvgRenderer`] - Bundled SVG implementation
//! - [`draw_tracks`] - Draw tracks and dwell circles onto a renderer
//! - [`export_dwells_json`] - Dwell events as JSON lines
//! - [`compute_export_path`] - Helper for consistent path computation

// Module declarations
pub mod analysis;
pub mod error;
pub mod export;
pub mod parser;
pub mod project;
pub mod render;
pub mod track;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use analysis::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use project::*;
#[allow(ambiguous_glob_reexports)]
pub use render::*;
#[allow(ambiguous_glob_reexports)]
pub use track::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
