//! Error types for skillplot-core
//!
//! Provides error handling for:
//! - Dataset loading (`DataUnavailable`, terminal for a chart)
//! - Configuration
//! - Export failures
//!
//! A lookup miss is not an error; see `QueryOutcome`. A `DomainError` from
//! the density evaluator is absorbed per query by the chart controller.

use std::path::PathBuf;
use thiserror::Error;

pub use skillplot_io::IoError;
pub use skillplot_stats::DomainError;

use crate::config::ConfigError;

/// Main error type for skillplot operations
#[derive(Error, Debug)]
pub enum SkillplotError {
    /// The rating table could not be loaded or parsed
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] IoError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Export errors
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Errors related to export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Unknown output format
    #[error("Unsupported export format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Invalid dimensions
    #[error("Invalid dimensions: {width}x{height} (must be positive and within limits)")]
    InvalidDimensions { width: f64, height: f64 },

    /// Chart has nothing to export yet
    #[error("Chart is not ready: {reason}")]
    NotReady { reason: String },

    /// Scene serialization failed
    #[error("Serialization failed: {message}")]
    Serialize { message: String },

    /// Drawing backend failed
    #[error("Rendering failed: {message}")]
    Render { message: String },

    /// Output could not be written
    #[error("Cannot write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Result type alias for skillplot operations
pub type SkillplotResult<T> = Result<T, SkillplotError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Validation utilities
pub mod validation {
    use super::*;

    const MAX_DIMENSION: f64 = 16384.0;

    /// Validate chart dimensions in pixels
    pub fn validate_dimensions(width: f64, height: f64) -> ExportResult<()> {
        let ok = |v: f64| v.is_finite() && v >= 1.0 && v <= MAX_DIMENSION;
        if !ok(width) || !ok(height) {
            return Err(ExportError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Validate an opacity value
    pub fn validate_unit_interval(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_display() {
        let err: SkillplotError = IoError::FileNotFound("ratings.csv".to_string()).into();
        assert!(err.to_string().contains("Data unavailable"));
        assert!(err.to_string().contains("ratings.csv"));
    }

    #[test]
    fn test_config_error_display() {
        let err: SkillplotError =
            ConfigError::OutOfRange("density.resolution must be positive".to_string()).into();
        assert!(err.to_string().contains("density.resolution"));
    }

    #[test]
    fn test_export_error_display() {
        let err = ExportError::InvalidDimensions {
            width: 0.0,
            height: 100.0,
        };
        assert!(err.to_string().contains("0x100"));
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validation::validate_dimensions(800.0, 600.0).is_ok());
        assert!(validation::validate_dimensions(0.0, 100.0).is_err());
        assert!(validation::validate_dimensions(20000.0, 100.0).is_err());
        assert!(validation::validate_dimensions(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_validate_unit_interval() {
        assert!(validation::validate_unit_interval(0.1));
        assert!(!validation::validate_unit_interval(1.5));
        assert!(!validation::validate_unit_interval(f64::NAN));
    }
}
