//! Common tile and grid fixtures.

use analyst_common::{BoundingBox, CrsCode, GridGeometry, TileRequest};
use renderer::{Sample, SampleGrid};

/// Bounding boxes used across the test suite, as `(min_x, min_y, max_x, max_y)`.
pub mod bbox {
    /// A small geographic tile around Portland, OR.
    pub const PORTLAND: (f64, f64, f64, f64) = (-122.75, 45.45, -122.55, 45.60);

    /// The same area in Web Mercator meters (approximate).
    pub const PORTLAND_MERCATOR: (f64, f64, f64, f64) =
        (-13_664_500.0, 5_693_000.0, -13_642_200.0, 5_716_900.0);

    /// Unit square at the origin.
    pub const UNIT: (f64, f64, f64, f64) = (0.0, 0.0, 1.0, 1.0);

    /// Invalid bbox (min > max).
    pub const INVALID: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

pub fn bounding_box(coords: (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(coords.0, coords.1, coords.2, coords.3)
}

pub fn tile_request(
    coords: (f64, f64, f64, f64),
    crs: CrsCode,
    width: u32,
    height: u32,
) -> TileRequest {
    TileRequest::new(bounding_box(coords), crs, width, height)
}

/// A geographic grid over [`bbox::PORTLAND`].
pub fn geographic_grid(width: u32, height: u32) -> GridGeometry {
    GridGeometry::new(bounding_box(bbox::PORTLAND), CrsCode::Epsg4326, width, height)
        .expect("fixture grid is valid")
}

/// A Web Mercator grid over [`bbox::PORTLAND_MERCATOR`].
pub fn mercator_grid(width: u32, height: u32) -> GridGeometry {
    GridGeometry::new(
        bounding_box(bbox::PORTLAND_MERCATOR),
        CrsCode::Epsg3857,
        width,
        height,
    )
    .expect("fixture grid is valid")
}

/// A sample grid where pixel `i` (row-major) links to vertex `i` at distance 0,
/// except where `present` is false.
pub fn indexed_samples(width: u32, height: u32, present: &[bool]) -> SampleGrid {
    let samples = (0..width * height)
        .map(|i| {
            let covered = present.get(i as usize).copied().unwrap_or(true);
            covered.then(|| Sample::single(i, 0.0))
        })
        .collect();
    SampleGrid::new(width, height, samples).expect("fixture sample grid is valid")
}
