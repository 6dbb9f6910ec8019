//! Render styles for travel-time tiles.
//!
//! A style selects the color ramp used to display a tile and the rule the
//! pixel encoder applies: absolute travel time, a signed delta between two
//! surfaces, or a discrete category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering style selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Raw grayscale bytes, no color ramp.
    Gray,
    /// Travel time in 15-minute color bands.
    Temporal,
    /// Signed travel-time delta between two surfaces.
    Difference,
    /// Dark veil that fades out as travel time grows.
    Transparent,
    /// Opaque outside the first hour, clear inside.
    Mask,
    /// Number of transit boardings.
    BoardingCount,
}

impl RenderStyle {
    pub const ALL: [RenderStyle; 6] = [
        RenderStyle::Gray,
        RenderStyle::Temporal,
        RenderStyle::Difference,
        RenderStyle::Transparent,
        RenderStyle::Mask,
        RenderStyle::BoardingCount,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            RenderStyle::Gray => "gray",
            RenderStyle::Temporal => "temporal",
            RenderStyle::Difference => "difference",
            RenderStyle::Transparent => "transparent",
            RenderStyle::Mask => "mask",
            RenderStyle::BoardingCount => "boarding_count",
        }
    }

    /// Whether pixel values are signed deltas rather than absolute minutes.
    pub fn is_signed(&self) -> bool {
        matches!(self, RenderStyle::Difference)
    }
}

impl FromStr for RenderStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gray" | "grey" => Ok(RenderStyle::Gray),
            "temporal" | "color30" => Ok(RenderStyle::Temporal),
            "difference" => Ok(RenderStyle::Difference),
            "transparent" => Ok(RenderStyle::Transparent),
            "mask" => Ok(RenderStyle::Mask),
            "boardings" | "boarding_count" => Ok(RenderStyle::BoardingCount),
            _ => Err(StyleParseError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StyleParseError {
    #[error("Unknown render style: {0}")]
    UnknownStyle(String),
}
