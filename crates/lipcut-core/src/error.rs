//! Error handling for lipcut
//!
//! Provides the G-Code error type raised while validating and writing
//! motion commands.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// G-Code error type
///
/// Represents errors raised while building or writing motion commands.
#[derive(Error, Debug, Clone)]
pub enum GcodeError {
    /// A coordinate or feed value cannot be written as G-Code
    #[error("Non-finite value for {word} in move {index}: {value}")]
    NonFiniteValue {
        /// Zero-based index of the move in the program.
        index: usize,
        /// The G-Code word (`X`, `Y`, `Z` or `F`).
        word: char,
        /// The offending value.
        value: f64,
    },

    /// Feed rate must be strictly positive
    #[error("Invalid feed rate {feed} in move {index}")]
    InvalidFeedRate {
        /// Zero-based index of the move in the program.
        index: usize,
        /// The offending feed rate.
        feed: f64,
    },

    /// Output sink could not be written
    #[error("Output error at move {index}: {reason}")]
    OutputError {
        /// Zero-based index of the move being written.
        index: usize,
        /// The reason the output failed.
        reason: String,
    },
}

impl GcodeError {
    /// Wrap a sink failure at the given move
    pub fn output(index: usize, err: std::io::Error) -> Self {
        GcodeError::OutputError {
            index,
            reason: err.to_string(),
        }
    }

    /// Check if this is an output error
    pub fn is_output_error(&self) -> bool {
        matches!(self, GcodeError::OutputError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcode_error_display() {
        let err = GcodeError::NonFiniteValue {
            index: 3,
            word: 'Z',
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Non-finite value for Z in move 3: NaN");

        let err = GcodeError::InvalidFeedRate {
            index: 0,
            feed: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid feed rate -1 in move 0");
    }

    #[test]
    fn test_output_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = GcodeError::output(12, io);
        assert!(err.is_output_error());
        assert_eq!(err.to_string(), "Output error at move 12: denied");

        let err = GcodeError::InvalidFeedRate {
            index: 0,
            feed: 0.0,
        };
        assert!(!err.is_output_error());
    }
}
