//! Coordinate reference system codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CRS a tile may be requested in.
///
/// All of these parse, but only the geographic codes and Web Mercator can be
/// reprojected to WGS84 for sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 longitude/latitude in degrees
    Epsg4326,
    /// Web Mercator meters
    Epsg3857,
    /// NAD83 longitude/latitude
    Epsg4269,
    Epsg5070,
    Epsg3413,
    Epsg3031,
}

/// Canonical name and extra accepted spellings of every code.
const CODES: [(CrsCode, &str, &[&str]); 6] = [
    (CrsCode::Epsg4326, "EPSG:4326", &["CRS:84"]),
    (CrsCode::Epsg3857, "EPSG:3857", &["EPSG:900913"]),
    (CrsCode::Epsg4269, "EPSG:4269", &[]),
    (CrsCode::Epsg5070, "EPSG:5070", &[]),
    (CrsCode::Epsg3413, "EPSG:3413", &[]),
    (CrsCode::Epsg3031, "EPSG:3031", &[]),
];

impl CrsCode {
    pub fn as_str(&self) -> &'static str {
        CODES
            .iter()
            .find(|(code, _, _)| code == self)
            .map_or("", |(_, name, _)| *name)
    }

    /// Longitude/latitude axes rather than projected meters.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326 | CrsCode::Epsg4269)
    }
}

impl FromStr for CrsCode {
    type Err = CrsParseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CODES
            .iter()
            .find(|(_, name, aliases)| {
                name.eq_ignore_ascii_case(wanted)
                    || aliases.iter().any(|alias| alias.eq_ignore_ascii_case(wanted))
            })
            .map(|(code, _, _)| *code)
            .ok_or_else(|| CrsParseError::UnsupportedCrs(s.to_string()))
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}
