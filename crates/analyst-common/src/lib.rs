//! Common types shared across the travel-time tile crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod request;
pub mod style;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{AnalystError, AnalystResult};
pub use grid::{GridGeometry, GridLimits, GridPoint};
pub use request::{LinearCombination, RenderRequest, TileRequest};
pub use style::RenderStyle;
