//! Coordinate reference system transformations.
//!
//! Tiles are requested in a projected or geographic CRS, while sample lookups
//! work in WGS84 longitude/latitude. This crate provides the small set of
//! transforms needed to move pixel centers between the two.

pub mod geographic;
pub mod mercator;
pub mod transform;

pub use geographic::Identity;
pub use mercator::{WebMercatorForward, WebMercatorInverse};
pub use transform::{find_transform, transform_point, CoordinateTransform, ProjectionError};
