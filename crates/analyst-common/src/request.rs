//! Tile and render request types.

use serde::{Deserialize, Serialize};

use crate::{AnalystError, AnalystResult, BoundingBox, CrsCode, RenderStyle};

/// Geographic area and pixel size of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRequest {
    pub bbox: BoundingBox,
    pub crs: CrsCode,
    pub width: u32,
    pub height: u32,
}

impl TileRequest {
    pub fn new(bbox: BoundingBox, crs: CrsCode, width: u32, height: u32) -> Self {
        Self {
            bbox,
            crs,
            width,
            height,
        }
    }

    /// Parse request parameters given as strings (`"minx,miny,maxx,maxy"`, `"EPSG:3857"`).
    pub fn parse(bbox: &str, crs: &str, width: u32, height: u32) -> AnalystResult<Self> {
        let request = Self {
            bbox: BoundingBox::parse(bbox)?,
            crs: crs.parse::<CrsCode>()?,
            width,
            height,
        };
        request.validate()?;
        Ok(request)
    }

    /// Reject requests that can never produce a tile.
    pub fn validate(&self) -> AnalystResult<()> {
        if self.width == 0 {
            return Err(AnalystError::invalid_parameter("width", "must be positive"));
        }
        if self.height == 0 {
            return Err(AnalystError::invalid_parameter("height", "must be positive"));
        }
        self.bbox.validate()?;
        Ok(())
    }
}

/// Coefficients for combining two travel-time surfaces into one pixel value:
/// `(k1 * a + k2 * b) / 60 + intercept` minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCombination {
    pub k1: f64,
    pub k2: f64,
    pub intercept: f64,
}

impl LinearCombination {
    pub fn new(k1: f64, k2: f64, intercept: f64) -> Self {
        Self { k1, k2, intercept }
    }

    /// `a - b`: positive where the first surface is slower.
    pub fn difference() -> Self {
        Self::new(1.0, -1.0, 0.0)
    }

    /// Surface `a` alone.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// How a tile should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub style: RenderStyle,
    /// Present for two-surface renders.
    #[serde(default)]
    pub combination: Option<LinearCombination>,
}

impl RenderRequest {
    pub fn single(style: RenderStyle) -> Self {
        Self {
            style,
            combination: None,
        }
    }

    pub fn combined(style: RenderStyle, combination: LinearCombination) -> Self {
        Self {
            style,
            combination: Some(combination),
        }
    }
}
