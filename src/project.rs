//! Cartographic projection seam
//!
//! The assembler treats projection as an external collaborator: any pure
//! `(longitude, latitude) -> (x, y)` mapping into a planar, meter-like
//! coordinate system works. A closure satisfies the trait directly, and a
//! simple equirectangular projection is bundled as the default.

/// Pure projection from geodetic degrees to planar coordinates
///
/// Argument order matches the fix fields the assembler hands over:
/// longitude first, latitude second.
pub trait Projector {
    fn project(&self, longitude: f64, latitude: f64) -> (f64, f64);
}

impl<F> Projector for F
where
    F: Fn(f64, f64) -> (f64, f64),
{
    fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        self(longitude, latitude)
    }
}

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Equirectangular local projection in meters
///
/// Distances are measured from a fixed origin, with the east-west scale
/// locked to the origin's parallel. Accurate enough for town-scale tracks;
/// callers needing a real CRS can supply their own [`Projector`].
#[derive(Debug, Clone, Copy)]
pub struct EquirectangularProjection {
    origin_latitude: f64,
    origin_longitude: f64,
}

impl EquirectangularProjection {
    pub fn centered_on(latitude: f64, longitude: f64) -> Self {
        Self {
            origin_latitude: latitude,
            origin_longitude: longitude,
        }
    }
}

impl Projector for EquirectangularProjection {
    fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let x = (longitude - self.origin_longitude).to_radians()
            * self.origin_latitude.to_radians().cos()
            * EARTH_RADIUS_METERS;
        let y = (latitude - self.origin_latitude).to_radians() * EARTH_RADIUS_METERS;
        (x, y)
    }
}
