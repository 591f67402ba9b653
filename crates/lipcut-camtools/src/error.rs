//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for lip toolpath generation,
//! parameter validation, and output handling.

use lipcut_settings::SettingsError;
use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// G-code generation failed.
    #[error("G-code generation failed: {0}")]
    GenerationFailed(String),

    /// A move could not be rendered as G-code.
    #[error(transparent)]
    Gcode(#[from] lipcut_core::GcodeError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// The generator settings are invalid.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cam_tool_error_display() {
        let err = CamToolError::GenerationFailed("move count overflows".to_string());
        assert_eq!(
            err.to_string(),
            "G-code generation failed: move count overflows"
        );

        let err: CamToolError = lipcut_core::GcodeError::OutputError {
            index: 4,
            reason: "disk full".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Output error at move 4: disk full");
    }

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::OutOfRange {
            name: "radius".to_string(),
            value: -5.0,
            min: 0.0,
            max: f64::INFINITY,
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'radius' out of range: -5 (valid: 0..inf)"
        );

        let err = ParameterError::InvalidValue {
            name: "max_step".to_string(),
            reason: "must be greater than zero, got 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'max_step': must be greater than zero, got 0"
        );

        let err = ParameterError::InvalidDimensions("width after radius is 0".to_string());
        assert_eq!(err.to_string(), "Invalid dimensions: width after radius is 0");
    }

    #[test]
    fn test_error_conversion() {
        let param_err = ParameterError::InvalidDimensions("width".to_string());
        let cam_err: CamToolError = param_err.into();
        assert!(matches!(cam_err, CamToolError::Parameter(_)));

        let settings_err = SettingsError::LoadError("nope".to_string());
        let cam_err: CamToolError = settings_err.into();
        assert!(matches!(cam_err, CamToolError::Settings(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let cam_err: CamToolError = io_err.into();
        assert!(matches!(cam_err, CamToolError::IoError(_)));
    }
}
