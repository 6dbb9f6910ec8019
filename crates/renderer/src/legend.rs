//! Legend strips for the travel-time color ramps.
//!
//! A legend is a horizontal strip where each column carries the pixel value
//! of its position along the style's value range, colored through the same
//! ramp a tile would use. Tick labels and a caption go with it; they are
//! drawn into the image when a font is available.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};

use analyst_common::{AnalystError, AnalystResult, RenderStyle};

use crate::colormap::{builtin_ramps, ColorRamp, ColorRampSet};

pub const MIN_WIDTH: u32 = 140;
pub const MAX_WIDTH: u32 = 2000;
pub const DEFAULT_WIDTH: u32 = 140;
pub const MIN_HEIGHT: u32 = 25;
pub const MAX_HEIGHT: u32 = 2000;
pub const DEFAULT_HEIGHT: u32 = 25;

/// Units between tick labels.
pub const LABEL_SPACING: i32 = 30;

pub const CAPTION: &str = "travel time (minutes)";

/// Default label height in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Width to render; out-of-range requests fall back to the default.
pub fn legend_width(width: u32) -> u32 {
    if (MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        width
    } else {
        DEFAULT_WIDTH
    }
}

/// Height to render; out-of-range requests fall back to the default.
pub fn legend_height(height: u32) -> u32 {
    if (MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
        height
    } else {
        DEFAULT_HEIGHT
    }
}

/// Minute range shown by a style's legend.
pub fn value_range(style: RenderStyle) -> (i32, i32) {
    if style.is_signed() {
        (-120, 120)
    } else {
        (0, 150)
    }
}

/// TrueType font used to draw legend text.
pub struct LegendFont {
    font: Font<'static>,
    size: f32,
}

impl LegendFont {
    pub fn from_bytes(bytes: Vec<u8>) -> AnalystResult<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| AnalystError::invalid_parameter("font", "not a TrueType font"))?;
        Ok(Self {
            font,
            size: DEFAULT_FONT_SIZE,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> AnalystResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Text placed on a legend; `(x, y)` is the top-left corner of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// A rendered legend.
#[derive(Debug, Clone)]
pub struct Legend {
    pub image: RgbaImage,
    pub caption: LegendLabel,
    pub labels: Vec<LegendLabel>,
}

/// Render a legend with the built-in ramps and no text.
///
/// `None` when the style has no ramp.
pub fn render_legend(style: RenderStyle, width: u32, height: u32) -> Option<Legend> {
    LegendRenderer::new().render(style, width, height)
}

/// Legend renderer with configurable ramps and font.
pub struct LegendRenderer<'a> {
    ramps: &'a ColorRampSet,
    font: Option<&'a LegendFont>,
}

impl<'a> LegendRenderer<'a> {
    pub fn new() -> Self {
        Self {
            ramps: builtin_ramps(),
            font: None,
        }
    }

    pub fn with_ramps(mut self, ramps: &'a ColorRampSet) -> Self {
        self.ramps = ramps;
        self
    }

    pub fn with_font(mut self, font: &'a LegendFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn render(&self, style: RenderStyle, width: u32, height: u32) -> Option<Legend> {
        let ramp = self.ramps.get(style)?;
        let width = legend_width(width);
        let height = legend_height(height);
        let (start, end) = value_range(style);

        let mut image = strip(ramp, start, end, width, height);

        let font_size = self.font.map_or(DEFAULT_FONT_SIZE, |f| f.size);
        let label_y = height as i32 - font_size.ceil() as i32;
        let bands = end - start;
        let labels: Vec<LegendLabel> = (start..end)
            .step_by(LABEL_SPACING as usize)
            .map(|value| LegendLabel {
                x: (value - start) * width as i32 / bands,
                y: label_y.max(0),
                text: value.to_string(),
            })
            .collect();
        let caption = LegendLabel {
            x: 0,
            y: 0,
            text: CAPTION.to_string(),
        };

        if let Some(font) = self.font {
            let scale = Scale::uniform(font.size);
            for label in std::iter::once(&caption).chain(labels.iter()) {
                draw_text_mut(
                    &mut image,
                    TEXT_COLOR,
                    label.x,
                    label.y,
                    scale,
                    &font.font,
                    &label.text,
                );
            }
        }

        Some(Legend {
            image,
            caption,
            labels,
        })
    }
}

impl Default for LegendRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Column `c` holds `start + c * (end - start) / width`, wrapped to a signed byte.
fn strip(ramp: &ColorRamp, start: i32, end: i32, width: u32, height: u32) -> RgbaImage {
    let bands = end - start;
    let columns: Vec<Rgba<u8>> = (0..width as i32)
        .map(|col| {
            let value = (start + col * bands / width as i32) as i8;
            Rgba(ramp.color(value))
        })
        .collect();
    RgbaImage::from_fn(width, height, |x, _| columns[x as usize])
}
