//! Sample grids and the providers that fill them.
//!
//! The renderer never cares where samples come from. A [`SampleProvider`]
//! hands it one optional [`Sample`] per pixel: [`DynamicSamples`] queries a
//! [`SampleSource`] for every pixel center, [`PrecomputedSamples`] serves a
//! grid that was materialized earlier.

use std::borrow::Cow;
use std::time::Instant;

use tracing::debug;

use analyst_common::{AnalystError, AnalystResult, CrsCode, GridGeometry};
use projection::{find_transform, CoordinateTransform};

use crate::sample::Sample;

/// Looks up the network link for a WGS84 position.
pub trait SampleSource: Send + Sync {
    /// `None` when the position has no coverage (off network, outside the routable area).
    fn sample(&self, lon: f64, lat: f64) -> Option<Sample>;
}

impl<T: SampleSource + ?Sized> SampleSource for &T {
    fn sample(&self, lon: f64, lat: f64) -> Option<Sample> {
        (**self).sample(lon, lat)
    }
}

impl<T: SampleSource + ?Sized> SampleSource for Box<T> {
    fn sample(&self, lon: f64, lat: f64) -> Option<Sample> {
        (**self).sample(lon, lat)
    }
}

/// One optional sample per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    width: u32,
    height: u32,
    samples: Vec<Option<Sample>>,
}

impl SampleGrid {
    pub fn new(width: u32, height: u32, samples: Vec<Option<Sample>>) -> AnalystResult<Self> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(AnalystError::RenderError(format!(
                "sample grid of {}x{} needs {} samples, got {}",
                width,
                height,
                expected,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A grid with no coverage anywhere.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, col: u32, row: u32) -> Option<&Sample> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.samples[row as usize * self.width as usize + col as usize].as_ref()
    }

    /// Samples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Sample>> {
        self.samples.iter().map(Option::as_ref)
    }

    /// Number of pixels with coverage.
    pub fn present_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_some()).count()
    }

    /// Whether this grid has one sample per pixel of `grid`.
    pub fn matches(&self, grid: &GridGeometry) -> bool {
        self.width == grid.width() && self.height == grid.height()
    }
}

/// Supplies the samples of a tile.
pub trait SampleProvider {
    fn samples(&self, grid: &GridGeometry) -> AnalystResult<Cow<'_, SampleGrid>>;
}

/// Samples looked up pixel by pixel from a [`SampleSource`].
pub struct DynamicSamples<S> {
    source: S,
    transform: Option<Box<dyn CoordinateTransform>>,
}

impl<S: SampleSource> DynamicSamples<S> {
    /// Reproject pixel centers to WGS84 using the built-in transform for the grid's CRS.
    pub fn new(source: S) -> Self {
        Self {
            source,
            transform: None,
        }
    }

    /// Reproject pixel centers with a caller-supplied transform.
    pub fn with_transform(source: S, transform: Box<dyn CoordinateTransform>) -> Self {
        Self {
            source,
            transform: Some(transform),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Query the source once per pixel, in row-major order.
    ///
    /// Fails as a whole if any pixel cannot be reprojected.
    pub fn build(&self, grid: &GridGeometry) -> AnalystResult<SampleGrid> {
        let started = Instant::now();

        let found;
        let transform: &dyn CoordinateTransform = match &self.transform {
            Some(t) => {
                if t.source() != grid.crs() {
                    return Err(AnalystError::TilePreparation(format!(
                        "transform expects {} coordinates but the tile is in {}",
                        t.source(),
                        grid.crs()
                    )));
                }
                t.as_ref()
            }
            None => {
                found = find_transform(grid.crs(), CrsCode::Epsg4326)
                    .map_err(|e| AnalystError::TilePreparation(e.to_string()))?;
                found.as_ref()
            }
        };

        let mut samples = Vec::with_capacity(grid.len());
        for cell in grid.cells() {
            let (lon, lat) = transform.transform(cell.x, cell.y).map_err(|e| {
                AnalystError::TilePreparation(format!(
                    "pixel ({}, {}): {}",
                    cell.col, cell.row, e
                ))
            })?;
            samples.push(self.source.sample(lon, lat));
        }

        let sample_grid = SampleGrid::new(grid.width(), grid.height(), samples)?;
        debug!(
            width = grid.width(),
            height = grid.height(),
            samples = sample_grid.present_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Finished preparing tile samples"
        );
        Ok(sample_grid)
    }
}

impl<S: SampleSource> SampleProvider for DynamicSamples<S> {
    fn samples(&self, grid: &GridGeometry) -> AnalystResult<Cow<'_, SampleGrid>> {
        self.build(grid).map(Cow::Owned)
    }
}

/// A sample grid computed ahead of time and reused across renders.
#[derive(Debug, Clone)]
pub struct PrecomputedSamples {
    grid: SampleGrid,
}

impl PrecomputedSamples {
    pub fn new(grid: SampleGrid) -> Self {
        Self { grid }
    }

    /// Materialize another provider's samples for repeated use.
    pub fn capture<P: SampleProvider + ?Sized>(
        provider: &P,
        grid: &GridGeometry,
    ) -> AnalystResult<Self> {
        Ok(Self::new(provider.samples(grid)?.into_owned()))
    }

    pub fn sample_grid(&self) -> &SampleGrid {
        &self.grid
    }
}

impl SampleProvider for PrecomputedSamples {
    fn samples(&self, grid: &GridGeometry) -> AnalystResult<Cow<'_, SampleGrid>> {
        if !self.grid.matches(grid) {
            return Err(AnalystError::RenderError(format!(
                "precomputed samples are {}x{} but the tile is {}x{}",
                self.grid.width(),
                self.grid.height(),
                grid.width(),
                grid.height()
            )));
        }
        Ok(Cow::Borrowed(&self.grid))
    }
}
