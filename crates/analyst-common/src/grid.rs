//! Pixel grid geometry for a tile.
//!
//! A [`GridGeometry`] is the authoritative frame for every pixel of a tile:
//! it pairs the pixel dimensions with the requested bounding box and holds the
//! affine transform between grid (column, row) and world (x, y) coordinates.
//!
//! Row 0 is the top (north) edge of the bbox. Grid coordinates address cell
//! centers, so pixel `(0, 0)` maps to `(min_x + dx / 2, max_y - dy / 2)`.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::request::TileRequest;
use crate::{AnalystError, AnalystResult, BoundingBox, CrsCode};

/// Upper bounds applied to tile dimensions before any allocation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            max_width: 4096,
            max_height: 4096,
        }
    }
}

/// Immutable geometry of a tile raster.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    bbox: BoundingBox,
    crs: CrsCode,
    to_world: Matrix3<f64>,
    to_grid: Matrix3<f64>,
}

/// A pixel with both its grid indices and the world coordinate of its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub col: u32,
    pub row: u32,
    pub x: f64,
    pub y: f64,
}

impl GridGeometry {
    /// Build the geometry for `width` x `height` pixels covering `bbox`.
    pub fn new(bbox: BoundingBox, crs: CrsCode, width: u32, height: u32) -> AnalystResult<Self> {
        Self::with_limits(bbox, crs, width, height, &GridLimits::default())
    }

    /// Build the geometry, enforcing explicit dimension limits.
    pub fn with_limits(
        bbox: BoundingBox,
        crs: CrsCode,
        width: u32,
        height: u32,
        limits: &GridLimits,
    ) -> AnalystResult<Self> {
        if width == 0 || width > limits.max_width {
            return Err(AnalystError::invalid_parameter(
                "width",
                format!("must be between 1 and {}, got {}", limits.max_width, width),
            ));
        }
        if height == 0 || height > limits.max_height {
            return Err(AnalystError::invalid_parameter(
                "height",
                format!("must be between 1 and {}, got {}", limits.max_height, height),
            ));
        }
        bbox.validate()?;

        let dx = bbox.width() / width as f64;
        let dy = bbox.height() / height as f64;

        #[rustfmt::skip]
        let to_world = Matrix3::new(
            dx,  0.0, bbox.min_x + 0.5 * dx,
            0.0, -dy, bbox.max_y - 0.5 * dy,
            0.0, 0.0, 1.0,
        );
        let to_grid = to_world.try_inverse().ok_or_else(|| {
            AnalystError::InvalidBbox(format!(
                "grid transform is not invertible for {}x{} over {:?}",
                width, height, bbox
            ))
        })?;

        Ok(Self {
            width,
            height,
            bbox,
            crs,
            to_world,
            to_grid,
        })
    }

    /// Build the geometry described by a tile request.
    pub fn from_request(request: &TileRequest) -> AnalystResult<Self> {
        Self::new(request.bbox, request.crs, request.width, request.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn crs(&self) -> CrsCode {
        self.crs
    }

    /// Number of pixels; always the length of the tile's pixel buffer.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false: construction rejects zero-sized grids.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major index of a pixel.
    pub fn flat_index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// World coordinate of a pixel center.
    pub fn grid_to_world(&self, col: u32, row: u32) -> (f64, f64) {
        self.grid_to_world_f64(col as f64, row as f64)
    }

    /// World coordinate of a fractional grid position.
    pub fn grid_to_world_f64(&self, col: f64, row: f64) -> (f64, f64) {
        let world = self.to_world * Vector3::new(col, row, 1.0);
        (world.x, world.y)
    }

    /// Fractional grid position of a world coordinate (inverse of `grid_to_world_f64`).
    pub fn world_to_grid(&self, x: f64, y: f64) -> (f64, f64) {
        let grid = self.to_grid * Vector3::new(x, y, 1.0);
        (grid.x, grid.y)
    }

    /// The pixel whose cell contains a world coordinate, if inside the tile.
    pub fn pixel_at(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        let (col, row) = self.world_to_grid(x, y);
        let col = (col + 0.5).floor();
        let row = (row + 0.5).floor();
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return None;
        }
        Some((col as u32, row as u32))
    }

    /// Every pixel of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| {
                let (x, y) = self.grid_to_world(col, row);
                GridPoint { col, row, x, y }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid() -> GridGeometry {
        GridGeometry::new(
            BoundingBox::new(0.0, 0.0, 4.0, 2.0),
            CrsCode::Epsg4326,
            4,
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_grid_to_world_uses_cell_centers() {
        let grid = unit_grid();
        assert_eq!(grid.grid_to_world(0, 0), (0.5, 1.5));
        assert_eq!(grid.grid_to_world(3, 1), (3.5, 0.5));
    }

    #[test]
    fn test_world_to_grid_inverts() {
        let grid = unit_grid();
        let (col, row) = grid.world_to_grid(2.5, 0.5);
        assert!((col - 2.0).abs() < 1e-12);
        assert!((row - 1.0).abs() < 1e-12);
        assert_eq!(grid.pixel_at(2.9, 1.9), Some((2, 0)));
        assert_eq!(grid.pixel_at(4.5, 1.0), None);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(GridGeometry::new(bbox, CrsCode::Epsg4326, 0, 10).is_err());
        assert!(GridGeometry::new(bbox, CrsCode::Epsg4326, 10, 0).is_err());
    }
}
