//! Travel-time tile rendering.
//!
//! - Color ramps built from sparse control points
//! - Samples, surfaces and the providers that lay samples out on a grid
//! - Pixel encoding to signed minute bytes
//! - Indexed rasters and legend strips

pub mod colormap;
pub mod encode;
pub mod legend;
pub mod raster;
pub mod sample;
pub mod sampling;

pub use colormap::{builtin_ramps, ColorRamp, ColorRampError, ColorRampSet, ControlPoint};
pub use encode::{encode_combination, encode_pixel, UNREACHABLE};
pub use legend::{render_legend, Legend, LegendFont, LegendLabel, LegendRenderer};
pub use raster::{render, render_combination, Envelope, IndexedRaster, TileRenderer};
pub use sample::{Sample, Surface, TimeSurface, VertexId, VertexLink, UNREACHABLE_SECONDS};
pub use sampling::{DynamicSamples, PrecomputedSamples, SampleGrid, SampleProvider, SampleSource};
