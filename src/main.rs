//! CLI binary for NMEA Timemap
//!
//! Parses one or more NMEA receiver logs, assembles each into a projected
//! track, analyzes speeds and dwells, and renders the combined map to an
//! SVG file. Optional per-file CSV and JSON artifacts sit next to the
//! inputs.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use glob::glob;
use nmea_timemap::{
    analyze, draw_tracks, export_dwells_json, first_rmc_fix, parse_nmea_file, BoundingBox,
    DecodeFailurePolicy, EquirectangularProjection, ExportOptions, RenderStyle, SvgRenderer,
    Track, TrackConfig, DEFAULT_IMAGE_WIDTH,
};
use std::path::PathBuf;

/// Stroke colors cycled across input files
const TRACK_COLORS: &[(u8, u8, u8)] = &[
    (0, 0, 0),
    (200, 200, 200),
    (178, 34, 34),
    (25, 25, 112),
    (34, 139, 34),
];

fn main() -> Result<()> {
    let matches = Command::new("NMEA Timemap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse NMEA-0183 GPS logs, analyze speed and dwells, render a track map.")
        .arg(
            Arg::new("files")
                .help("NMEA log files to parse (.nmea, .txt, .log extensions, case-insensitive, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("utc-offset")
                .long("utc-offset")
                .help("Receiver UTC offset in hours; must be zero or negative")
                .value_name("HOURS")
                .allow_hyphen_values(true)
                .value_parser(clap::value_parser!(f64))
                .default_value("-8"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .help("Dwell speed threshold in projected units per second")
                .value_name("SPEED")
                .value_parser(clap::value_parser!(f64))
                .default_value("1.5"),
        )
        .arg(
            Arg::new("circle-scale")
                .long("circle-scale")
                .help("Dwell circle diameter per sqrt(second) of waiting, in pixels")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(f64))
                .default_value("5"),
        )
        .arg(
            Arg::new("circle-outline")
                .long("circle-outline")
                .help("Dwell circle outline width in pixels")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(f64))
                .default_value("1"),
        )
        .arg(
            Arg::new("speed-thickness")
                .long("speed-thickness")
                .help("Track stroke width per unit of speed, in pixels")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.5"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Rendered map width in pixels")
                .value_name("PIXELS")
                .value_parser(clap::value_parser!(u32))
                .default_value("2000"),
        )
        .arg(
            Arg::new("no-dwell-circles")
                .long("no-dwell-circles")
                .help("Do not draw dwell circles on the map")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("flush-dwell")
                .long("flush-dwell")
                .help("Close a dwell still open at end of track instead of dropping it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("fail-fast")
                .long("fail-fast")
                .help("Abort a file on its first bad line instead of skipping and reporting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export track samples to .track.csv files next to each input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dwells")
                .long("dwells")
                .help("Export dwell events to .dwell.json files (JSON lines)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for exported artifacts (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Path of the rendered SVG map")
                .value_name("FILE")
                .default_value("map.svg"),
        )
        .arg(
            Arg::new("origin")
                .long("origin")
                .help("Projection origin as LAT,LON in decimal degrees (default: first decoded fix)")
                .value_name("LAT,LON")
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and per-dwell details")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    let draw_dwell_circles = !matches.get_flag("no-dwell-circles");
    let width = *matches.get_one::<u32>("width").unwrap_or(&DEFAULT_IMAGE_WIDTH);
    let output_path = PathBuf::from(matches.get_one::<String>("output").map(String::as_str).unwrap_or("map.svg"));
    let file_patterns: Vec<&String> = matches.get_many::<String>("files").unwrap().collect();

    let config = TrackConfig {
        utc_offset: *matches.get_one::<f64>("utc-offset").unwrap_or(&-8.0),
        speed_threshold: *matches.get_one::<f64>("threshold").unwrap_or(&1.5),
        dwell_circle_scale: *matches.get_one::<f64>("circle-scale").unwrap_or(&5.0),
        decode_failure_policy: if matches.get_flag("fail-fast") {
            DecodeFailurePolicy::FailFast
        } else {
            DecodeFailurePolicy::Skip
        },
        flush_trailing_dwell: matches.get_flag("flush-dwell"),
    };
    config.validate()?;

    let style = RenderStyle {
        speed_thickness: *matches.get_one::<f64>("speed-thickness").unwrap_or(&0.5),
        circle_outline: *matches.get_one::<f64>("circle-outline").unwrap_or(&1.0),
        draw_dwells: draw_dwell_circles,
    };

    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        dwells: matches.get_flag("dwells"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };

    let valid_paths = expand_input_files(&file_patterns, debug);
    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .nmea, .txt, .log (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let projection = build_projection(matches.get_one::<String>("origin"), &valid_paths, &config)?;

    // Assemble one independent track per file
    let mut tracks: Vec<(PathBuf, Track)> = Vec::new();
    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match parse_nmea_file(path, &config, &projection) {
            Ok(track) => {
                println!(
                    "Assembled {} samples spanning {:.0} s",
                    track.sample_count(),
                    track.duration_seconds()
                );
                if debug && track.gga_ignored > 0 {
                    println!("Ignored {} GGA fixes (no date information)", track.gga_ignored);
                }
                if !track.skipped.is_empty() {
                    eprintln!("{}", track.skipped.summary());
                }
                if track.has_samples() {
                    tracks.push((path.clone(), track));
                } else {
                    eprintln!("Warning: no usable RMC sentences in {filename}");
                }
            }
            Err(e) => {
                eprintln!("Error processing {filename}: {e}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if tracks.is_empty() {
        eprintln!(
            "Error: No tracks were assembled out of {} files found.",
            valid_paths.len()
        );
        eprintln!("Use --debug for more detailed information.");
        std::process::exit(1);
    }

    // Per-track analysis drives the exports and the console details
    let mut total_dwells = 0;
    for (path, track) in &tracks {
        let analysis = analyze(
            &track.samples,
            config.speed_threshold,
            config.flush_trailing_dwell,
        );
        total_dwells += analysis.dwells.len();

        if debug {
            for dwell in &analysis.dwells {
                println!(
                    "waited for {:.0} s at ({:.1}, {:.1})",
                    dwell.duration, dwell.x, dwell.y
                );
            }
        }

        if export_options.dwells {
            export_dwells_json(&analysis.dwells, path, &export_options)?;
        }

        #[cfg(feature = "csv")]
        if export_options.csv {
            nmea_timemap::export_track_csv(track, path, &export_options)?;
        }
        #[cfg(not(feature = "csv"))]
        if export_options.csv {
            eprintln!("Warning: CSV export requested but the csv feature is disabled");
        }
    }

    // One viewport covering every track
    let mut viewport = BoundingBox::new();
    for (_, track) in &tracks {
        viewport.merge(&track.bounds);
    }

    let mut renderer = SvgRenderer::new(&viewport, width)?;
    renderer.background(255, 255, 255);

    let colored: Vec<(&Track, (u8, u8, u8))> = tracks
        .iter()
        .enumerate()
        .map(|(i, (_, track))| (track, TRACK_COLORS[i % TRACK_COLORS.len()]))
        .collect();
    draw_tracks(&mut renderer, &colored, &config, &style);

    renderer
        .save(&output_path)
        .with_context(|| format!("Failed to write map to {:?}", output_path))?;

    println!();
    println!(
        "Rendered {} track(s) with {} dwell event(s) to: {}",
        tracks.len(),
        total_dwells,
        output_path.display()
    );

    Ok(())
}

/// Expand patterns to existing files with a supported extension
fn expand_input_files(patterns: &[&String], debug: bool) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();

    for pattern in patterns {
        let candidates: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<std::result::Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        if debug {
                            println!("Glob pattern '{pattern}' matched {} files", paths.len());
                        }
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![PathBuf::from(pattern)]
        };

        for path in candidates {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let supported = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    let ext = ext.to_ascii_lowercase();
                    ext == "nmea" || ext == "txt" || ext == "log"
                })
                .unwrap_or(false);
            if !supported {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            if debug {
                println!("Added valid file: {path:?}");
            }
            valid_paths.push(path);
        }
    }

    valid_paths
}

/// Build the projection, centered on an explicit origin or the first fix
fn build_projection(
    origin: Option<&String>,
    paths: &[PathBuf],
    config: &TrackConfig,
) -> Result<EquirectangularProjection> {
    if let Some(raw) = origin {
        let (lat, lon) = parse_origin(raw)?;
        return Ok(EquirectangularProjection::centered_on(lat, lon));
    }

    for path in paths {
        match first_rmc_fix(path, config) {
            Ok(Some(fix)) => {
                return Ok(EquirectangularProjection::centered_on(
                    fix.latitude,
                    fix.longitude,
                ));
            }
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Warning: could not scan {:?} for a projection origin: {e}", path);
            }
        }
    }

    bail!("No decodable RMC fix found to anchor the projection; pass --origin LAT,LON");
}

/// Parse a "LAT,LON" pair in decimal degrees
fn parse_origin(raw: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        bail!("--origin takes LAT,LON in decimal degrees, got '{raw}'");
    }
    let lat: f64 = parts[0]
        .trim()
        .parse()
        .with_context(|| format!("bad origin latitude '{}'", parts[0]))?;
    let lon: f64 = parts[1]
        .trim()
        .parse()
        .with_context(|| format!("bad origin longitude '{}'", parts[1]))?;
    Ok((lat, lon))
}
