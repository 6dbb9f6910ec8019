//! A synthetic street network for demo tiles.
//!
//! Vertices sit on a regular lattice over a WGS84 extent, vertex `(c, r)` at
//! `lon = min_x + c * step_x`, `lat = max_y - r * step_y`, numbered row-major.
//! Travel times radiate from an origin at a constant speed.

use analyst_common::BoundingBox;
use renderer::{Sample, SampleSource, TimeSurface, VertexLink, UNREACHABLE_SECONDS};

const EARTH_RADIUS: f64 = 6_371_008.8;

/// Approximate ground distance in meters (equirectangular).
pub fn distance_meters(a: (f64, f64), b: (f64, f64)) -> f64 {
    let mean_lat = ((a.1 + b.1) / 2.0).to_radians();
    let dx = (b.0 - a.0).to_radians() * mean_lat.cos();
    let dy = (b.1 - a.1).to_radians();
    (dx * dx + dy * dy).sqrt() * EARTH_RADIUS
}

#[derive(Debug, Clone)]
pub struct LatticeNetwork {
    extent: BoundingBox,
    cols: u32,
    rows: u32,
}

impl LatticeNetwork {
    /// `cols` and `rows` are raised to at least 2.
    pub fn new(extent: BoundingBox, cols: u32, rows: u32) -> Self {
        Self {
            extent,
            cols: cols.max(2),
            rows: rows.max(2),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    fn step(&self) -> (f64, f64) {
        (
            self.extent.width() / f64::from(self.cols - 1),
            self.extent.height() / f64::from(self.rows - 1),
        )
    }

    pub fn position(&self, vertex: u32) -> (f64, f64) {
        let (step_x, step_y) = self.step();
        let col = vertex % self.cols;
        let row = vertex / self.cols;
        (
            self.extent.min_x + f64::from(col) * step_x,
            self.extent.max_y - f64::from(row) * step_y,
        )
    }

    fn link(&self, col: u32, row: u32, lon: f64, lat: f64) -> VertexLink {
        let vertex = row * self.cols + col;
        let distance = distance_meters((lon, lat), self.position(vertex));
        VertexLink::new(vertex, distance as f32)
    }

    /// Travel times from `origin` at `speed` m/s; vertices beyond `max_seconds` are unreached.
    pub fn travel_times(&self, origin: (f64, f64), speed: f64, max_seconds: i64) -> TimeSurface {
        let times = (0..self.vertex_count() as u32)
            .map(|vertex| {
                let seconds = (distance_meters(origin, self.position(vertex)) / speed).round() as i64;
                if seconds > max_seconds {
                    UNREACHABLE_SECONDS
                } else {
                    seconds
                }
            })
            .collect();
        TimeSurface::new(times)
    }
}

impl SampleSource for LatticeNetwork {
    /// Links a position to the two lattice vertices on either side of it along its row.
    fn sample(&self, lon: f64, lat: f64) -> Option<Sample> {
        if !self.extent.contains_point(lon, lat) {
            return None;
        }
        let (step_x, step_y) = self.step();
        let fx = (lon - self.extent.min_x) / step_x;
        let fy = (self.extent.max_y - lat) / step_y;
        let row = (fy.round() as u32).min(self.rows - 1);
        let west = (fx.floor() as u32).min(self.cols - 1);
        let east = (west + 1).min(self.cols - 1);

        let primary = self.link(west, row, lon, lat);
        let secondary = (east != west).then(|| self.link(east, row, lon, lat));
        Some(Sample::new(primary, secondary))
    }
}
