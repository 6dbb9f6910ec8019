//! Error types for the tile rendering crates.

use thiserror::Error;

use crate::bbox::BboxParseError;
use crate::crs::CrsParseError;
use crate::style::StyleParseError;

/// Result type alias using AnalystError.
pub type AnalystResult<T> = Result<T, AnalystError>;

/// Primary error type for tile rendering operations.
#[derive(Debug, Error)]
pub enum AnalystError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Style not found: {0}")]
    StyleNotFound(String),

    #[error("Invalid CRS: {0}")]
    InvalidCrs(String),

    #[error("Invalid BBOX: {0}")]
    InvalidBbox(String),

    // === Rendering Errors ===
    #[error("Tile preparation failed: {0}")]
    TilePreparation(String),

    #[error("Projection error: {0}")]
    ProjectionError(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Invalid color ramp: {0}")]
    ColorRampError(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AnalystError {
    /// Convenience constructor for parameter validation failures.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        AnalystError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code a service front end should answer with.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AnalystError::MissingParameter(_)
            | AnalystError::InvalidParameter { .. }
            | AnalystError::InvalidCrs(_)
            | AnalystError::InvalidBbox(_) => 400,

            AnalystError::StyleNotFound(_) => 404,

            _ => 500,
        }
    }
}

impl From<BboxParseError> for AnalystError {
    fn from(err: BboxParseError) -> Self {
        AnalystError::InvalidBbox(err.to_string())
    }
}

impl From<CrsParseError> for AnalystError {
    fn from(err: CrsParseError) -> Self {
        AnalystError::InvalidCrs(err.to_string())
    }
}

impl From<StyleParseError> for AnalystError {
    fn from(err: StyleParseError) -> Self {
        AnalystError::StyleNotFound(err.to_string())
    }
}

// Conversion from common error types
impl From<std::io::Error> for AnalystError {
    fn from(err: std::io::Error) -> Self {
        AnalystError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AnalystError {
    fn from(err: serde_json::Error) -> Self {
        AnalystError::InternalError(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AnalystError::InvalidBbox("x".into()).http_status_code(), 400);
        assert_eq!(AnalystError::StyleNotFound("x".into()).http_status_code(), 404);
        assert_eq!(
            AnalystError::TilePreparation("x".into()).http_status_code(),
            500
        );
    }
}
