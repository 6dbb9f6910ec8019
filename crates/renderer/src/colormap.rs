//! 256-entry color ramps for indexed travel-time rasters.
//!
//! Pixel values are signed bytes (minutes, or signed minute deltas), while a
//! color table is addressed by unsigned index. The two are related by
//! reinterpreting the byte: table index = `value mod 256`, so `-1` lives at
//! entry 255 and the unreachable sentinel `-128` at entry 128. Control point
//! indices follow the same rule and may be negative.
//!
//! A ramp is built by linear interpolation between consecutive control
//! points. Each segment `[p0, p1)` writes the entries from `p0.index` up to
//! but excluding `p1.index`; the last point only terminates the final
//! segment. Equal consecutive indices make an immediate color jump: the
//! zero-length segment writes nothing and the next segment starts from the
//! second point.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use analyst_common::{AnalystError, AnalystResult, RenderStyle};

/// Number of entries in every color table.
pub const RAMP_SIZE: usize = 256;

/// Lowest accepted control point index.
pub const MIN_INDEX: i16 = -128;

/// Highest accepted control point index.
pub const MAX_INDEX: i16 = 383;

/// RGBA color.
pub type Rgba = [u8; 4];

/// Table position for a (possibly negative) ramp index.
pub fn table_index(index: i32) -> usize {
    index.rem_euclid(RAMP_SIZE as i32) as usize
}

/// A labeled color at a ramp index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i16, u8, u8, u8, u8)", into = "(i16, u8, u8, u8, u8)")]
pub struct ControlPoint {
    pub index: i16,
    pub color: Rgba,
}

impl ControlPoint {
    pub const fn new(index: i16, r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            index,
            color: [r, g, b, a],
        }
    }
}

impl From<(i16, u8, u8, u8, u8)> for ControlPoint {
    fn from((index, r, g, b, a): (i16, u8, u8, u8, u8)) -> Self {
        Self::new(index, r, g, b, a)
    }
}

impl From<ControlPoint> for (i16, u8, u8, u8, u8) {
    fn from(p: ControlPoint) -> Self {
        (p.index, p.color[0], p.color[1], p.color[2], p.color[3])
    }
}

/// Reasons a control point list cannot become a ramp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorRampError {
    #[error("A color ramp needs at least two control points, got {0}")]
    TooFewPoints(usize),

    #[error("Control point {position} has index {index}, lower than the previous index {previous}")]
    NonIncreasingIndex {
        position: usize,
        previous: i16,
        index: i16,
    },

    #[error("Control point index {0} is outside [-128, 383]")]
    IndexOutOfRange(i16),

    #[error("Control points span {0} entries, more than the 256-entry table")]
    SpanTooWide(i32),
}

impl From<ColorRampError> for AnalystError {
    fn from(err: ColorRampError) -> Self {
        AnalystError::ColorRampError(err.to_string())
    }
}

/// An immutable 256-entry RGBA lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRamp {
    entries: [Rgba; RAMP_SIZE],
}

impl ColorRamp {
    /// Build a ramp by piecewise-linear interpolation between control points.
    ///
    /// Indices must be non-decreasing; see the module docs for how equal
    /// indices and negative indices are handled.
    pub fn interpolated(points: &[ControlPoint]) -> Result<Self, ColorRampError> {
        validate_points(points)?;
        Ok(Self::fill(points))
    }

    /// Build a ramp from a complete table.
    pub fn from_entries(entries: [Rgba; RAMP_SIZE]) -> Self {
        Self { entries }
    }

    fn fill(points: &[ControlPoint]) -> Self {
        let mut entries = [[0u8; 4]; RAMP_SIZE];
        for pair in points.windows(2) {
            fill_segment(&mut entries, &pair[0], &pair[1]);
        }
        Self { entries }
    }

    /// Color for a signed pixel value.
    pub fn color(&self, pixel: i8) -> Rgba {
        // `as u8` is the two's-complement reinterpretation, i.e. mod 256.
        self.entries[pixel as u8 as usize]
    }

    /// Color at an unsigned table position.
    pub fn entry(&self, index: u8) -> Rgba {
        self.entries[index as usize]
    }

    pub fn entries(&self) -> &[Rgba; RAMP_SIZE] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        RAMP_SIZE
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

fn validate_points(points: &[ControlPoint]) -> Result<(), ColorRampError> {
    if points.len() < 2 {
        return Err(ColorRampError::TooFewPoints(points.len()));
    }
    for point in points {
        if !(MIN_INDEX..=MAX_INDEX).contains(&point.index) {
            return Err(ColorRampError::IndexOutOfRange(point.index));
        }
    }
    for (position, pair) in points.windows(2).enumerate() {
        if pair[1].index < pair[0].index {
            return Err(ColorRampError::NonIncreasingIndex {
                position: position + 1,
                previous: pair[0].index,
                index: pair[1].index,
            });
        }
    }
    let span = i32::from(points[points.len() - 1].index) - i32::from(points[0].index);
    if span > RAMP_SIZE as i32 {
        return Err(ColorRampError::SpanTooWide(span));
    }
    Ok(())
}

fn fill_segment(entries: &mut [Rgba; RAMP_SIZE], p0: &ControlPoint, p1: &ControlPoint) {
    let start = i32::from(p0.index);
    let steps = i32::from(p1.index) - start;
    if steps <= 0 {
        return;
    }
    for channel in 0..4 {
        let v0 = i32::from(p0.color[channel]);
        let v1 = i32::from(p1.color[channel]);
        let delta = (v1 - v0) as f32 / steps as f32;
        for i in 0..steps {
            let v = v0 + (delta * i as f32).floor() as i32;
            entries[table_index(start + i)][channel] = v as u8;
        }
    }
}

// ============================================================================
// Built-in ramps
// ============================================================================

/// Stepped 15-minute bands, fading in across each band.
pub const TEMPORAL_POINTS: &[ControlPoint] = &[
    ControlPoint::new(-128, 100, 100, 100, 200),
    ControlPoint::new(0, 100, 100, 100, 0),
    ControlPoint::new(15, 100, 100, 100, 90),
    ControlPoint::new(15, 0, 140, 0, 10),
    ControlPoint::new(30, 0, 140, 0, 90),
    ControlPoint::new(30, 0, 0, 140, 10),
    ControlPoint::new(45, 0, 0, 140, 90),
    ControlPoint::new(45, 140, 140, 0, 10),
    ControlPoint::new(60, 140, 140, 0, 90),
    ControlPoint::new(60, 140, 0, 0, 10),
    ControlPoint::new(75, 140, 0, 0, 90),
    ControlPoint::new(75, 140, 0, 140, 10),
    ControlPoint::new(90, 140, 0, 140, 90),
    ControlPoint::new(90, 100, 100, 100, 50),
    ControlPoint::new(121, 100, 100, 100, 200),
];

/// Signed minutes: red/yellow where the first surface is faster, blue/green where slower.
pub const DIFFERENCE_POINTS: &[ControlPoint] = &[
    ControlPoint::new(-128, 0, 0, 0, 0),
    ControlPoint::new(-127, 150, 0, 0, 80),
    ControlPoint::new(-60, 150, 0, 0, 80),
    ControlPoint::new(-15, 150, 150, 0, 80),
    ControlPoint::new(0, 150, 150, 0, 0),
    ControlPoint::new(0, 0, 0, 0, 0),
    ControlPoint::new(15, 0, 0, 150, 80),
    ControlPoint::new(45, 0, 150, 0, 90),
    ControlPoint::new(60, 100, 150, 100, 99),
    ControlPoint::new(127, 50, 150, 50, 99),
];

/// Black veil that is opaque when unreachable and clears over the first hour.
pub const TRANSPARENT_POINTS: &[ControlPoint] = &[
    ControlPoint::new(-128, 0, 0, 0, 255),
    ControlPoint::new(0, 0, 0, 0, 255),
    ControlPoint::new(60, 0, 0, 0, 0),
    ControlPoint::new(120, 0, 0, 0, 0),
];

/// Opaque black at zero minutes fading to clear at one hour.
pub const MASK_POINTS: &[ControlPoint] = &[
    ControlPoint::new(0, 0, 0, 0, 255),
    ControlPoint::new(60, 0, 0, 0, 0),
];

/// Alpha of every boarding-count entry except the last.
const BOARDING_ALPHA: u8 = 80;

/// Discrete ramp for boarding counts 0..=3: green, blue, yellow, red.
pub fn boarding_ramp() -> ColorRamp {
    let mut entries = [[0, 0, 0, BOARDING_ALPHA]; RAMP_SIZE];
    entries[0] = [0, 255, 0, BOARDING_ALPHA];
    entries[1] = [0, 0, 255, BOARDING_ALPHA];
    entries[2] = [255, 255, 0, BOARDING_ALPHA];
    entries[3] = [255, 0, 0, BOARDING_ALPHA];
    entries[255] = [0, 0, 0, 0];
    ColorRamp::from_entries(entries)
}

/// Mapping from render style to color ramp.
///
/// Styles without an entry (by default only [`RenderStyle::Gray`]) render as
/// raw grayscale and have no legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRampSet {
    ramps: HashMap<RenderStyle, ColorRamp>,
}

/// On-disk ramp definitions: `{"version": "1.0", "ramps": {"temporal": [[idx, r, g, b, a], ...]}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RampFile {
    #[serde(default = "default_version")]
    pub version: String,
    pub ramps: HashMap<String, Vec<ControlPoint>>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl ColorRampSet {
    /// The fixed ramps every process starts with.
    pub fn builtin() -> Self {
        let ramps = HashMap::from([
            (RenderStyle::Temporal, ColorRamp::fill(TEMPORAL_POINTS)),
            (RenderStyle::Difference, ColorRamp::fill(DIFFERENCE_POINTS)),
            (RenderStyle::Transparent, ColorRamp::fill(TRANSPARENT_POINTS)),
            (RenderStyle::Mask, ColorRamp::fill(MASK_POINTS)),
            (RenderStyle::BoardingCount, boarding_ramp()),
        ]);
        Self { ramps }
    }

    /// An empty set: every style renders as grayscale.
    pub fn empty() -> Self {
        Self {
            ramps: HashMap::new(),
        }
    }

    /// Built-in ramps overridden by the ramps defined in a JSON document.
    pub fn from_json(json: &str) -> AnalystResult<Self> {
        let file: RampFile = serde_json::from_str(json)?;
        let mut set = Self::builtin();
        for (name, points) in &file.ramps {
            let style: RenderStyle = name.parse()?;
            let ramp = ColorRamp::interpolated(points).map_err(|e| {
                warn!(style = %style, error = %e, "Rejected ramp definition");
                AnalystError::ColorRampError(format!("{}: {}", name, e))
            })?;
            set.ramps.insert(style, ramp);
        }
        debug!(
            version = %file.version,
            overrides = file.ramps.len(),
            "Loaded color ramp definitions"
        );
        Ok(set)
    }

    /// Load ramp overrides from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> AnalystResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn get(&self, style: RenderStyle) -> Option<&ColorRamp> {
        self.ramps.get(&style)
    }

    pub fn insert(&mut self, style: RenderStyle, ramp: ColorRamp) {
        self.ramps.insert(style, ramp);
    }
}

impl Default for ColorRampSet {
    fn default() -> Self {
        Self::builtin()
    }
}

static BUILTIN_RAMPS: Lazy<ColorRampSet> = Lazy::new(ColorRampSet::builtin);

/// Process-wide built-in ramps; built on first use, read-only afterwards.
pub fn builtin_ramps() -> &'static ColorRampSet {
    &BUILTIN_RAMPS
}

/// Built-in ramp for a style, if it has one.
pub fn ramp_for_style(style: RenderStyle) -> Option<&'static ColorRamp> {
    BUILTIN_RAMPS.get(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_index_wraps_negative() {
        assert_eq!(table_index(-1), 255);
        assert_eq!(table_index(-128), 128);
        assert_eq!(table_index(0), 0);
        assert_eq!(table_index(256), 0);
    }

    #[test]
    fn test_builtin_points_are_valid() {
        for points in [TEMPORAL_POINTS, DIFFERENCE_POINTS, TRANSPARENT_POINTS, MASK_POINTS] {
            assert!(ColorRamp::interpolated(points).is_ok());
        }
    }

    #[test]
    fn test_color_reinterprets_sign() {
        let ramp = ColorRamp::fill(DIFFERENCE_POINTS);
        assert_eq!(ramp.color(-1), ramp.entry(255));
        assert_eq!(ramp.color(-128), ramp.entry(128));
        assert_eq!(ramp.color(127), ramp.entry(127));
    }

    #[test]
    fn test_control_point_json_tuple() {
        let p: ControlPoint = serde_json::from_str("[-15, 150, 150, 0, 80]").unwrap();
        assert_eq!(p, ControlPoint::new(-15, 150, 150, 0, 80));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[-15,150,150,0,80]");
    }
}
