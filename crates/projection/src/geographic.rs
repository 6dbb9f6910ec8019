//! Pass-through transform between equivalent coordinate systems.
//!
//! WGS84 and NAD83 differ by well under a meter, far below tile resolution,
//! so they are treated as the same datum.

use analyst_common::CrsCode;

use crate::transform::{ensure_finite, CoordinateTransform, ProjectionError};

/// Identity transform that still validates its input domain.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    source: CrsCode,
    target: CrsCode,
}

impl Identity {
    pub fn new(source: CrsCode, target: CrsCode) -> Self {
        Self { source, target }
    }
}

impl CoordinateTransform for Identity {
    fn source(&self) -> CrsCode {
        self.source
    }

    fn target(&self) -> CrsCode {
        self.target
    }

    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let (x, y) = ensure_finite(x, y, self.source)?;
        if self.source.is_geographic() && !(-90.0..=90.0).contains(&y) {
            return Err(ProjectionError::OutOfDomain {
                x,
                y,
                crs: self.source,
            });
        }
        Ok((x, y))
    }
}
