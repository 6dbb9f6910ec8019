//! Tests for tile grid geometry.

use analyst_common::{
    AnalystError, BoundingBox, CrsCode, GridGeometry, GridLimits, TileRequest,
};

fn mercator_grid(width: u32, height: u32) -> GridGeometry {
    GridGeometry::new(
        BoundingBox::new(-13_680_000.0, 5_690_000.0, -13_670_000.0, 5_700_000.0),
        CrsCode::Epsg3857,
        width,
        height,
    )
    .unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_request_copies_dimensions() {
    let request = TileRequest::new(
        BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        CrsCode::Epsg4326,
        256,
        128,
    );
    let grid = GridGeometry::from_request(&request).unwrap();
    assert_eq!(grid.width(), 256);
    assert_eq!(grid.height(), 128);
    assert_eq!(grid.len(), 256 * 128);
    assert_eq!(grid.crs(), CrsCode::Epsg4326);
}

#[test]
fn test_rejects_malformed_bbox() {
    let result = GridGeometry::new(
        BoundingBox::new(1.0, 1.0, 0.0, 0.0),
        CrsCode::Epsg4326,
        16,
        16,
    );
    assert!(matches!(result, Err(AnalystError::InvalidBbox(_))));
}

#[test]
fn test_enforces_limits() {
    let limits = GridLimits {
        max_width: 64,
        max_height: 64,
    };
    let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    assert!(GridGeometry::with_limits(bbox, CrsCode::Epsg4326, 64, 64, &limits).is_ok());
    assert!(matches!(
        GridGeometry::with_limits(bbox, CrsCode::Epsg4326, 65, 64, &limits),
        Err(AnalystError::InvalidParameter { param, .. }) if param == "width"
    ));
}

// ============================================================================
// Affine mapping
// ============================================================================

#[test]
fn test_round_trip_every_pixel() {
    let grid = mercator_grid(16, 8);
    for cell in grid.cells() {
        let (col, row) = grid.world_to_grid(cell.x, cell.y);
        assert!((col - cell.col as f64).abs() < 1e-6, "col {} vs {}", col, cell.col);
        assert!((row - cell.row as f64).abs() < 1e-6, "row {} vs {}", row, cell.row);
        assert_eq!(grid.pixel_at(cell.x, cell.y), Some((cell.col, cell.row)));
    }
}

#[test]
fn test_cells_are_row_major() {
    let grid = mercator_grid(3, 2);
    let order: Vec<(u32, u32)> = grid.cells().map(|c| (c.col, c.row)).collect();
    assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    for cell in grid.cells() {
        let index = grid.flat_index(cell.col, cell.row);
        assert_eq!(index, (cell.row * 3 + cell.col) as usize);
    }
}

#[test]
fn test_top_row_is_north() {
    let grid = mercator_grid(10, 10);
    let (_, top) = grid.grid_to_world(0, 0);
    let (_, bottom) = grid.grid_to_world(0, 9);
    assert!(top > bottom);
    assert!(grid.bbox().contains_point(grid.grid_to_world(9, 9).0, bottom));
}

#[test]
fn test_pixel_at_outside_tile() {
    let grid = mercator_grid(10, 10);
    assert_eq!(grid.pixel_at(0.0, 0.0), None);
}
