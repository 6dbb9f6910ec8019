//! Spherical Web Mercator (EPSG:3857).
//!
//! Uses the WGS84 semi-major axis as the sphere radius, as every web map
//! tiling scheme does.

use std::f64::consts::PI;

use analyst_common::CrsCode;

use crate::transform::{ensure_finite, CoordinateTransform, ProjectionError};

/// Sphere radius in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half the projected world width in meters.
pub const MAX_EXTENT: f64 = PI * EARTH_RADIUS;

/// Latitude where Web Mercator y reaches `MAX_EXTENT`.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Convert latitude in degrees to Web Mercator Y.
pub fn lat_to_mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.to_radians();
    ((PI / 4.0) + (lat_rad / 2.0)).tan().ln() * EARTH_RADIUS
}

/// Convert Web Mercator Y to latitude in degrees.
pub fn mercator_y_to_lat(y: f64) -> f64 {
    (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees()
}

/// EPSG:3857 meters to geographic degrees.
#[derive(Debug, Clone, Copy)]
pub struct WebMercatorInverse {
    target: CrsCode,
}

impl WebMercatorInverse {
    pub fn new(target: CrsCode) -> Self {
        Self { target }
    }
}

impl CoordinateTransform for WebMercatorInverse {
    fn source(&self) -> CrsCode {
        CrsCode::Epsg3857
    }

    fn target(&self) -> CrsCode {
        self.target
    }

    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        ensure_finite(x, y, CrsCode::Epsg3857)?;
        let lon = (x / EARTH_RADIUS).to_degrees();
        let lat = mercator_y_to_lat(y);
        ensure_finite(lon, lat, self.target)
    }
}

/// Geographic degrees to EPSG:3857 meters.
#[derive(Debug, Clone, Copy)]
pub struct WebMercatorForward {
    source: CrsCode,
}

impl WebMercatorForward {
    pub fn new(source: CrsCode) -> Self {
        Self { source }
    }
}

impl CoordinateTransform for WebMercatorForward {
    fn source(&self) -> CrsCode {
        self.source
    }

    fn target(&self) -> CrsCode {
        CrsCode::Epsg3857
    }

    fn transform(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        ensure_finite(lon, lat, self.source)?;
        if lat.abs() > MAX_LATITUDE {
            return Err(ProjectionError::OutOfDomain {
                x: lon,
                y: lat,
                crs: self.source,
            });
        }
        let x = lon.to_radians() * EARTH_RADIUS;
        let y = lat_to_mercator_y(lat);
        ensure_finite(x, y, CrsCode::Epsg3857)
    }
}
