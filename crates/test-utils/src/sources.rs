//! Synthetic sample sources and surfaces.

use analyst_common::BoundingBox;
use renderer::{Sample, SampleSource, Surface};

/// A regular lattice of network vertices laid over a bbox.
///
/// Vertex ids run row-major from the north-west corner. A position maps to the
/// nearest vertex; the walk distance is always zero. Positions outside the
/// bbox have no coverage. Both dimensions are at least 1.
#[derive(Debug, Clone)]
pub struct LatticeSource {
    pub bbox: BoundingBox,
    pub cols: u32,
    pub rows: u32,
}

impl LatticeSource {
    pub fn new(bbox: BoundingBox, cols: u32, rows: u32) -> Self {
        Self {
            bbox,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Vertex nearest to a position, if the position lies inside the lattice.
    pub fn vertex_at(&self, lon: f64, lat: f64) -> Option<u32> {
        if !self.bbox.contains_point(lon, lat) {
            return None;
        }
        let fx = (lon - self.bbox.min_x) / self.bbox.width();
        let fy = (self.bbox.max_y - lat) / self.bbox.height();
        let col = ((fx * self.cols as f64) as u32).min(self.cols.saturating_sub(1));
        let row = ((fy * self.rows as f64) as u32).min(self.rows.saturating_sub(1));
        Some(row * self.cols + col)
    }
}

impl SampleSource for LatticeSource {
    fn sample(&self, lon: f64, lat: f64) -> Option<Sample> {
        self.vertex_at(lon, lat).map(|v| Sample::single(v, 0.0))
    }
}

/// A source with no coverage anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCoverage;

impl SampleSource for NoCoverage {
    fn sample(&self, _lon: f64, _lat: f64) -> Option<Sample> {
        None
    }
}

/// Counts how often it is queried; every query is covered by vertex 0.
#[derive(Debug, Default)]
pub struct CountingSource {
    queries: std::sync::atomic::AtomicUsize,
}

impl CountingSource {
    pub fn queries(&self) -> usize {
        self.queries.load(std::sync::atomic::Ordering::Relaxed)
    }
}

impl SampleSource for CountingSource {
    fn sample(&self, _lon: f64, _lat: f64) -> Option<Sample> {
        self.queries
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Some(Sample::single(0, 0.0))
    }
}

/// Surface backed by a closure.
pub struct FnSurface<F>(pub F);

impl<F> Surface for FnSurface<F>
where
    F: Fn(&Sample) -> Option<i64> + Send + Sync,
{
    fn eval(&self, sample: &Sample) -> Option<i64> {
        (self.0)(sample)
    }
}

/// Surface with the same value at every sample.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSurface(pub Option<i64>);

impl Surface for ConstantSurface {
    fn eval(&self, _sample: &Sample) -> Option<i64> {
        self.0
    }
}
