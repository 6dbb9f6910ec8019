//! Transform lookup between CRS pairs.

use analyst_common::{AnalystError, CrsCode};

use crate::geographic::Identity;
use crate::mercator::{WebMercatorForward, WebMercatorInverse};

/// Errors raised while transforming coordinates.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("No transform from {from} to {to}")]
    UnsupportedTransform { from: CrsCode, to: CrsCode },

    #[error("Coordinate ({x}, {y}) is outside the domain of {crs}")]
    OutOfDomain { x: f64, y: f64, crs: CrsCode },
}

impl From<ProjectionError> for AnalystError {
    fn from(err: ProjectionError) -> Self {
        AnalystError::ProjectionError(err.to_string())
    }
}

/// A point transform from one CRS into another.
pub trait CoordinateTransform: Send + Sync {
    /// CRS of input coordinates.
    fn source(&self) -> CrsCode;

    /// CRS of output coordinates.
    fn target(&self) -> CrsCode;

    /// Transform a single world coordinate.
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError>;
}

/// Find the transform taking coordinates from `source` into `target`.
pub fn find_transform(
    source: CrsCode,
    target: CrsCode,
) -> Result<Box<dyn CoordinateTransform>, ProjectionError> {
    match (source, target) {
        (s, t) if s.is_geographic() && t.is_geographic() => {
            Ok(Box::new(Identity::new(s, t)))
        }
        (CrsCode::Epsg3857, CrsCode::Epsg3857) => {
            Ok(Box::new(Identity::new(source, target)))
        }
        (CrsCode::Epsg3857, t) if t.is_geographic() => Ok(Box::new(WebMercatorInverse::new(t))),
        (s, CrsCode::Epsg3857) if s.is_geographic() => Ok(Box::new(WebMercatorForward::new(s))),
        _ => Err(ProjectionError::UnsupportedTransform {
            from: source,
            to: target,
        }),
    }
}

/// Transform one coordinate between two CRS.
pub fn transform_point(
    point: (f64, f64),
    source: CrsCode,
    target: CrsCode,
) -> Result<(f64, f64), ProjectionError> {
    find_transform(source, target)?.transform(point.0, point.1)
}

/// Check that a transformed coordinate is usable.
pub(crate) fn ensure_finite(x: f64, y: f64, crs: CrsCode) -> Result<(f64, f64), ProjectionError> {
    if x.is_finite() && y.is_finite() {
        Ok((x, y))
    } else {
        Err(ProjectionError::OutOfDomain { x, y, crs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_supported_pairs() {
        assert!(find_transform(CrsCode::Epsg4326, CrsCode::Epsg4326).is_ok());
        assert!(find_transform(CrsCode::Epsg4269, CrsCode::Epsg4326).is_ok());
        assert!(find_transform(CrsCode::Epsg3857, CrsCode::Epsg4326).is_ok());
        assert!(find_transform(CrsCode::Epsg4326, CrsCode::Epsg3857).is_ok());
    }

    #[test]
    fn test_unsupported_pair() {
        let err = find_transform(CrsCode::Epsg3413, CrsCode::Epsg4326).err().unwrap();
        assert!(matches!(err, ProjectionError::UnsupportedTransform { .. }));
        assert!(err.to_string().contains("EPSG:3413"));
    }

    #[test]
    fn test_transform_point_mercator_origin() {
        let (lon, lat) =
            transform_point((0.0, 0.0), CrsCode::Epsg3857, CrsCode::Epsg4326).unwrap();
        assert!(lon.abs() < 1e-12);
        assert!(lat.abs() < 1e-12);
    }

    #[test]
    fn test_error_converts_to_analyst_error() {
        let err: AnalystError = ProjectionError::OutOfDomain {
            x: f64::NAN,
            y: 0.0,
            crs: CrsCode::Epsg4326,
        }
        .into();
        assert!(matches!(err, AnalystError::ProjectionError(_)));
    }
}
