//! Per-pixel samples and the travel-time surfaces evaluated at them.
//!
//! A [`Sample`] ties a pixel to the street network: it records up to two
//! nearby network vertices and the walking distance from the pixel to each.
//! A [`Surface`] turns a sample into a travel time by looking up the time at
//! those vertices and adding the walk.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Sentinel seconds value meaning "not reached".
pub const UNREACHABLE_SECONDS: i64 = i64::MAX;

/// Default walking speed in meters per second.
pub const DEFAULT_WALK_SPEED: f64 = 1.33;

/// Index of a street-network vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// A network vertex near a pixel and the walking distance to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexLink {
    pub vertex: VertexId,
    /// Meters from the pixel to the vertex.
    pub distance: f32,
}

impl VertexLink {
    pub fn new(vertex: u32, distance: f32) -> Self {
        Self {
            vertex: VertexId(vertex),
            distance,
        }
    }
}

/// Link between one pixel and the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    primary: VertexLink,
    secondary: Option<VertexLink>,
}

impl Sample {
    /// A sample linked to two vertices, typically the ends of the nearest edge.
    pub fn new(primary: VertexLink, secondary: Option<VertexLink>) -> Self {
        Self { primary, secondary }
    }

    /// A sample linked to a single vertex.
    pub fn single(vertex: u32, distance: f32) -> Self {
        Self::new(VertexLink::new(vertex, distance), None)
    }

    pub fn links(&self) -> impl Iterator<Item = &VertexLink> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }

    /// Evaluate a surface at this sample.
    pub fn eval<S: Surface + ?Sized>(&self, surface: &S) -> Option<i64> {
        surface.eval(self)
    }
}

/// A travel-time field evaluated at samples.
pub trait Surface: Send + Sync {
    /// Travel time in seconds at the sample, or `None` if unreachable.
    fn eval(&self, sample: &Sample) -> Option<i64>;
}

impl<T: Surface + ?Sized> Surface for &T {
    fn eval(&self, sample: &Sample) -> Option<i64> {
        (**self).eval(sample)
    }
}

impl<T: Surface + ?Sized> Surface for Box<T> {
    fn eval(&self, sample: &Sample) -> Option<i64> {
        (**self).eval(sample)
    }
}

/// Travel times from one origin, stored per network vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSurface {
    times: Vec<i64>,
    walk_speed: f64,
}

impl TimeSurface {
    /// Build a surface from per-vertex seconds; [`UNREACHABLE_SECONDS`] marks unreached vertices.
    pub fn new(times: Vec<i64>) -> Self {
        Self {
            times,
            walk_speed: DEFAULT_WALK_SPEED,
        }
    }

    /// Set the walking speed in meters per second.
    ///
    /// Speeds that are not finite and positive keep the current speed.
    pub fn with_walk_speed(mut self, walk_speed: f64) -> Self {
        if walk_speed.is_finite() && walk_speed > 0.0 {
            self.walk_speed = walk_speed;
        } else {
            warn!(walk_speed, "Ignoring invalid walk speed");
        }
        self
    }

    pub fn walk_speed(&self) -> f64 {
        self.walk_speed
    }

    /// Seconds to reach a vertex.
    pub fn time(&self, vertex: VertexId) -> Option<i64> {
        match self.times.get(vertex.0 as usize) {
            Some(&t) if t != UNREACHABLE_SECONDS => Some(t),
            _ => None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.times.len()
    }
}

impl Surface for TimeSurface {
    fn eval(&self, sample: &Sample) -> Option<i64> {
        sample
            .links()
            .filter_map(|link| {
                let walk = (f64::from(link.distance) / self.walk_speed).round() as i64;
                self.time(link.vertex).and_then(|t| t.checked_add(walk))
            })
            .filter(|&t| t != UNREACHABLE_SECONDS)
            .min()
    }
}
