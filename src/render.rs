//! Map rendering
//!
//! The analysis core never draws anything itself; [`draw_tracks`] walks
//! tracks and issues primitive calls on a [`MapRenderer`] sink in a fixed
//! order: per-track stroke color, per-segment stroke weight and line, then
//! the dwell circles. The bundled sink renders those primitives into an
//! SVG document sized from the merged bounding box.

use crate::analysis::{detect_dwells, segment_speed};
use crate::error::{NmeaError, Result};
use crate::track::TrackConfig;
use crate::types::{BoundingBox, Track};
use std::io::Write;
use std::path::Path;

/// Default output width in pixels
pub const DEFAULT_IMAGE_WIDTH: u32 = 2000;

/// Primitive sink the track drawing code talks to
///
/// Positions are in projected world coordinates; stroke weights and
/// circle diameters are in output pixels. Implementations keep the last
/// stroke/fill state and apply it to subsequent shapes.
pub trait MapRenderer {
    fn stroke(&mut self, r: u8, g: u8, b: u8);
    fn stroke_weight(&mut self, weight: f64);
    fn fill(&mut self, r: u8, g: u8, b: u8, alpha: u8);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn ellipse(&mut self, cx: f64, cy: f64, diameter: f64);
}

/// Visual options that do not affect the analysis
#[derive(Debug, Clone)]
pub struct RenderStyle {
    /// Stroke width per unit of segment speed, in pixels
    pub speed_thickness: f64,
    /// Outline width of dwell circles, in pixels
    pub circle_outline: f64,
    pub draw_dwells: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            speed_thickness: 0.5,
            circle_outline: 1.0,
            draw_dwells: true,
        }
    }
}

/// Draw every track, then the dwell circles on top
///
/// Each segment is drawn with a stroke width proportional to its speed.
/// Segments with non-finite or negative speed are render breaks: nothing
/// is drawn for them, and the dwell scan handles them on its own terms.
/// Dwell circles are filled translucent red, outlined in the base color,
/// with diameter `dwell_circle_scale * sqrt(duration)`.
pub fn draw_tracks<R: MapRenderer>(
    renderer: &mut R,
    tracks: &[(&Track, (u8, u8, u8))],
    config: &TrackConfig,
    style: &RenderStyle,
) {
    for (track, color) in tracks {
        let (r, g, b) = *color;
        renderer.stroke(r, g, b);

        for pair in track.samples.windows(2) {
            let speed = segment_speed(&pair[0], &pair[1]);
            if !speed.is_finite() || speed < 0.0 {
                continue;
            }
            renderer.stroke_weight(style.speed_thickness * speed);
            renderer.line(pair[0].x, pair[0].y, pair[1].x, pair[1].y);
        }
    }

    if !style.draw_dwells {
        return;
    }

    renderer.stroke(0, 0, 0);
    renderer.stroke_weight(style.circle_outline);
    renderer.fill(255, 0, 0, 64);

    for (track, _) in tracks {
        let dwells = detect_dwells(
            &track.samples,
            config.speed_threshold,
            config.flush_trailing_dwell,
        );
        for dwell in dwells {
            let diameter = config.dwell_circle_scale * dwell.duration.sqrt();
            renderer.ellipse(dwell.x, dwell.y, diameter);
        }
    }
}

/// SVG-writing [`MapRenderer`]
///
/// Maps the world bounding box onto a fixed-width viewport with the y
/// axis flipped so north points up, buffers shape elements in memory, and
/// writes the finished document on [`SvgRenderer::save`].
#[derive(Debug)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
    scale: f64,
    min_x: f64,
    max_y: f64,
    stroke: (u8, u8, u8),
    stroke_weight: f64,
    fill: (u8, u8, u8, u8),
    body: String,
}

impl SvgRenderer {
    /// Size a renderer from world bounds and a pixel width
    ///
    /// Degenerate bounds (a single point, a purely vertical or horizontal
    /// track) fall back to a one-unit world span on the flat axis. Empty
    /// bounds are an error: nothing was ever included.
    pub fn new(bounds: &BoundingBox, width: u32) -> Result<Self> {
        if bounds.is_empty() {
            return Err(NmeaError::Export(
                "cannot size a map from an empty bounding box".to_string(),
            ));
        }

        let span_x = if bounds.width() > 0.0 { bounds.width() } else { 1.0 };
        let span_y = if bounds.height() > 0.0 { bounds.height() } else { 1.0 };

        let scale = width as f64 / span_x;
        let height = (span_y * scale).ceil().max(1.0) as u32;

        Ok(Self {
            width,
            height,
            scale,
            min_x: bounds.min_x,
            max_y: bounds.max_y,
            stroke: (0, 0, 0),
            stroke_weight: 1.0,
            fill: (255, 255, 255, 0),
            body: String::new(),
        })
    }

    /// World coordinates to pixel coordinates, north up
    fn map(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.min_x) * self.scale, (self.max_y - y) * self.scale)
    }

    /// Paint the whole viewport in one color
    pub fn background(&mut self, r: u8, g: u8, b: u8) {
        self.body.push_str(&format!(
            "  <rect width=\"100%\" height=\"100%\" fill=\"rgb({},{},{})\"/>\n",
            r, g, b
        ));
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The finished document as a string
    pub fn to_svg(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n\
             {}</svg>\n",
            self.width, self.height, self.width, self.height, self.body
        )
    }

    /// Write the document to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.to_svg().as_bytes())?;
        Ok(())
    }
}

impl MapRenderer for SvgRenderer {
    fn stroke(&mut self, r: u8, g: u8, b: u8) {
        self.stroke = (r, g, b);
    }

    fn stroke_weight(&mut self, weight: f64) {
        self.stroke_weight = weight;
    }

    fn fill(&mut self, r: u8, g: u8, b: u8, alpha: u8) {
        self.fill = (r, g, b, alpha);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (px1, py1) = self.map(x1, y1);
        let (px2, py2) = self.map(x2, y2);
        let (r, g, b) = self.stroke;
        self.body.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"rgb({},{},{})\" stroke-width=\"{:.2}\"/>\n",
            px1, py1, px2, py2, r, g, b, self.stroke_weight
        ));
    }

    fn ellipse(&mut self, cx: f64, cy: f64, diameter: f64) {
        let (px, py) = self.map(cx, cy);
        let (r, g, b) = self.stroke;
        let (fr, fg, fb, fa) = self.fill;
        self.body.push_str(&format!(
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"rgb({},{},{})\" fill-opacity=\"{:.3}\" stroke=\"rgb({},{},{})\" stroke-width=\"{:.2}\"/>\n",
            px, py, diameter / 2.0, fr, fg, fb, fa as f64 / 255.0, r, g, b, self.stroke_weight
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox {
        let mut b = BoundingBox::new();
        b.include(min_x, min_y);
        b.include(max_x, max_y);
        b
    }

    fn track_from(points: &[(f64, f64, f64)]) -> Track {
        let mut track = Track::new();
        for (x, y, t) in points {
            track.push_sample(*x, *y, *t);
        }
        track
    }

    #[test]
    fn test_viewport_mapping_flips_y() {
        let renderer = SvgRenderer::new(&bounds(0.0, 0.0, 100.0, 100.0), 200).unwrap();
        assert_eq!(renderer.height(), 200);
        assert_eq!(renderer.map(0.0, 0.0), (0.0, 200.0));
        assert_eq!(renderer.map(100.0, 100.0), (200.0, 0.0));
        assert_eq!(renderer.map(50.0, 50.0), (100.0, 100.0));
    }

    #[test]
    fn test_empty_bounds_refused() {
        let err = SvgRenderer::new(&BoundingBox::new(), 200).unwrap_err();
        assert!(matches!(err, NmeaError::Export(_)));
    }

    #[test]
    fn test_single_point_bounds_render() {
        let renderer = SvgRenderer::new(&bounds(5.0, 5.0, 5.0, 5.0), 200).unwrap();
        assert!(renderer.height() >= 1);
    }

    #[test]
    fn test_line_and_state_in_output() {
        let mut renderer = SvgRenderer::new(&bounds(0.0, 0.0, 10.0, 10.0), 100).unwrap();
        renderer.background(255, 255, 255);
        renderer.stroke(200, 100, 50);
        renderer.stroke_weight(2.5);
        renderer.line(0.0, 0.0, 10.0, 10.0);

        let svg = renderer.to_svg();
        assert!(svg.contains("<rect width=\"100%\""));
        assert!(svg.contains("stroke=\"rgb(200,100,50)\""));
        assert!(svg.contains("stroke-width=\"2.50\""));
        assert!(svg.contains("x1=\"0.00\" y1=\"100.00\" x2=\"100.00\" y2=\"0.00\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_circle_uses_fill_state() {
        let mut renderer = SvgRenderer::new(&bounds(0.0, 0.0, 10.0, 10.0), 100).unwrap();
        renderer.fill(255, 0, 0, 64);
        renderer.ellipse(5.0, 5.0, 8.0);

        let svg = renderer.to_svg();
        assert!(svg.contains("<circle cx=\"50.00\" cy=\"50.00\" r=\"4.00\""));
        assert!(svg.contains("fill=\"rgb(255,0,0)\" fill-opacity=\"0.251\""));
    }

    #[test]
    fn test_draw_tracks_skips_degenerate_segments() {
        // Second and third samples share a timestamp: infinite speed
        let track = track_from(&[
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 1.0),
            (20.0, 0.0, 1.0),
            (30.0, 0.0, 2.0),
        ]);
        let mut renderer = SvgRenderer::new(&track.bounds, 100).unwrap();
        let config = TrackConfig::default();
        let style = RenderStyle {
            draw_dwells: false,
            ..RenderStyle::default()
        };

        draw_tracks(&mut renderer, &[(&track, (0, 0, 0))], &config, &style);

        let svg = renderer.to_svg();
        assert_eq!(svg.matches("<line").count(), 2);
    }

    #[test]
    fn test_draw_tracks_circles_dwells() {
        // Slow for four seconds at the origin, then a fast getaway
        let track = track_from(&[
            (0.0, 0.0, 0.0),
            (0.5, 0.0, 1.0),
            (1.0, 0.0, 2.0),
            (1.5, 0.0, 3.0),
            (2.0, 0.0, 4.0),
            (100.0, 0.0, 5.0),
        ]);
        let mut renderer = SvgRenderer::new(&track.bounds, 100).unwrap();
        let config = TrackConfig::default();
        let style = RenderStyle::default();

        draw_tracks(&mut renderer, &[(&track, (0, 0, 0))], &config, &style);

        let svg = renderer.to_svg();
        assert_eq!(svg.matches("<circle").count(), 1);
        // diameter = 5 * sqrt(4), so the radius attribute is 5
        assert!(svg.contains("r=\"5.00\""));
    }

    #[test]
    fn test_per_track_stroke_colors() {
        let a = track_from(&[(0.0, 0.0, 0.0), (10.0, 0.0, 1.0)]);
        let b = track_from(&[(0.0, 5.0, 0.0), (10.0, 5.0, 1.0)]);
        let mut merged = a.bounds;
        merged.merge(&b.bounds);

        let mut renderer = SvgRenderer::new(&merged, 100).unwrap();
        let config = TrackConfig::default();
        draw_tracks(
            &mut renderer,
            &[(&a, (0, 0, 0)), (&b, (200, 200, 200))],
            &config,
            &RenderStyle::default(),
        );

        let svg = renderer.to_svg();
        assert!(svg.contains("stroke=\"rgb(0,0,0)\""));
        assert!(svg.contains("stroke=\"rgb(200,200,200)\""));
    }
}
