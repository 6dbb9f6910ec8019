//! Tile rasterization: one encoded byte per pixel.
//!
//! The renderer walks the sample grid in row-major order, encodes every pixel
//! and stores the byte at `row * width + col`. Colors are only looked up when
//! the raster is converted for display.

use std::time::Instant;

use image::{Rgba, RgbaImage};
use tracing::debug;

use analyst_common::{
    AnalystError, AnalystResult, BoundingBox, CrsCode, GridGeometry, LinearCombination,
    RenderRequest, RenderStyle,
};

use crate::colormap::{builtin_ramps, ColorRamp, ColorRampSet};
use crate::encode::{encode_combination, encode_pixel};
use crate::sample::{Sample, Surface};
use crate::sampling::{SampleGrid, SampleProvider};

/// Where a raster lies: its bbox in its CRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub bbox: BoundingBox,
    pub crs: CrsCode,
}

/// A rendered tile: encoded pixels plus the ramp that colors them.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRaster {
    width: u32,
    height: u32,
    style: RenderStyle,
    envelope: Envelope,
    pixels: Vec<u8>,
    ramp: Option<ColorRamp>,
}

impl IndexedRaster {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    /// Raw pixel bytes, row-major; each byte is a ramp index.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Encoded value of one pixel.
    pub fn pixel(&self, col: u32, row: u32) -> Option<i8> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.pixels[row as usize * self.width as usize + col as usize] as i8)
    }

    /// All pixels as signed values.
    pub fn values(&self) -> Vec<i8> {
        self.pixels.iter().map(|&p| p as i8).collect()
    }

    /// Ramp used for display; `None` renders as grayscale.
    pub fn ramp(&self) -> Option<&ColorRamp> {
        self.ramp.as_ref()
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Convert to RGBA for display.
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let byte = self.pixels[y as usize * self.width as usize + x as usize];
            match &self.ramp {
                Some(ramp) => Rgba(ramp.entry(byte)),
                None => Rgba([byte, byte, byte, 255]),
            }
        })
    }
}

/// Render a single surface using the built-in ramps.
pub fn render<S: Surface + ?Sized>(
    grid: &GridGeometry,
    samples: &SampleGrid,
    surface: &S,
    style: RenderStyle,
) -> AnalystResult<IndexedRaster> {
    rasterize(grid, samples, style, builtin_ramps(), |sample| {
        encode_pixel(sample, surface, style)
    })
}

/// Render a linear combination of two surfaces using the built-in ramps.
pub fn render_combination<A, B>(
    grid: &GridGeometry,
    samples: &SampleGrid,
    surface_a: &A,
    surface_b: &B,
    combination: &LinearCombination,
    style: RenderStyle,
) -> AnalystResult<IndexedRaster>
where
    A: Surface + ?Sized,
    B: Surface + ?Sized,
{
    rasterize(grid, samples, style, builtin_ramps(), |sample| {
        encode_combination(sample, surface_a, surface_b, combination)
    })
}

fn rasterize<F>(
    grid: &GridGeometry,
    samples: &SampleGrid,
    style: RenderStyle,
    ramps: &ColorRampSet,
    encode: F,
) -> AnalystResult<IndexedRaster>
where
    F: Fn(Option<&Sample>) -> i8,
{
    if !samples.matches(grid) {
        return Err(AnalystError::RenderError(format!(
            "sample grid is {}x{} but the tile is {}x{}",
            samples.width(),
            samples.height(),
            grid.width(),
            grid.height()
        )));
    }

    let started = Instant::now();
    let mut pixels = vec![0u8; grid.len()];
    for (pixel, sample) in pixels.iter_mut().zip(samples.iter()) {
        *pixel = encode(sample) as u8;
    }
    debug!(
        style = %style,
        width = grid.width(),
        height = grid.height(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Filled in tile image"
    );

    Ok(IndexedRaster {
        width: grid.width(),
        height: grid.height(),
        style,
        envelope: Envelope {
            bbox: *grid.bbox(),
            crs: grid.crs(),
        },
        pixels,
        ramp: ramps.get(style).cloned(),
    })
}

/// Renders tiles of one grid from a pluggable sample provider.
pub struct TileRenderer<'a, P: SampleProvider + ?Sized> {
    grid: GridGeometry,
    provider: &'a P,
    ramps: &'a ColorRampSet,
}

impl<'a, P: SampleProvider + ?Sized> TileRenderer<'a, P> {
    pub fn new(grid: GridGeometry, provider: &'a P) -> Self {
        Self {
            grid,
            provider,
            ramps: builtin_ramps(),
        }
    }

    /// Color rasters with a custom ramp set instead of the built-in one.
    pub fn with_ramps(mut self, ramps: &'a ColorRampSet) -> Self {
        self.ramps = ramps;
        self
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// Render one surface.
    pub fn generate_image<S: Surface + ?Sized>(
        &self,
        surface: &S,
        style: RenderStyle,
    ) -> AnalystResult<IndexedRaster> {
        let samples = self.provider.samples(&self.grid)?;
        rasterize(&self.grid, &samples, style, self.ramps, |sample| {
            encode_pixel(sample, surface, style)
        })
    }

    /// Render `(k1 * a + k2 * b) / 60 + intercept`.
    pub fn linear_combination<A, B>(
        &self,
        surface_a: &A,
        surface_b: &B,
        combination: &LinearCombination,
        style: RenderStyle,
    ) -> AnalystResult<IndexedRaster>
    where
        A: Surface + ?Sized,
        B: Surface + ?Sized,
    {
        let samples = self.provider.samples(&self.grid)?;
        rasterize(&self.grid, &samples, style, self.ramps, |sample| {
            encode_combination(sample, surface_a, surface_b, combination)
        })
    }

    /// Render as the request says: a combination when it carries one, else `primary` alone.
    pub fn render(
        &self,
        request: &RenderRequest,
        primary: &dyn Surface,
        secondary: Option<&dyn Surface>,
    ) -> AnalystResult<IndexedRaster> {
        match (&request.combination, secondary) {
            (Some(combination), Some(secondary)) => {
                self.linear_combination(primary, secondary, combination, request.style)
            }
            (Some(_), None) => Err(AnalystError::MissingParameter(
                "second surface for linear combination".to_string(),
            )),
            (None, _) => self.generate_image(primary, request.style),
        }
    }
}
