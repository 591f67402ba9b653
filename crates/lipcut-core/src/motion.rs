//! Linear motion records and their G-Code rendering.
//!
//! A [`LinearMove`] is a single `G1` command: an absolute X/Y/Z target plus
//! a feed rate. Records are immutable once built and render with the
//! shortest decimal form of each value, so `50.0` is written as `50` and
//! `0.4` as `0.4`.

use crate::error::GcodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine axis addressed by a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Primary travel axis (along the lip length)
    X,
    /// Secondary axis (across the lip width)
    Y,
    /// Vertical axis
    Z,
}

impl Axis {
    /// G-Code address letter for this axis
    pub fn word(&self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

/// Line termination applied when rendering a record
///
/// Console output relies on the console writer to separate lines, so
/// records headed there are rendered [`LineEnding::Bare`]. Records streamed
/// into a file carry their own newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// No terminator appended
    #[default]
    Bare,
    /// A single `\n` appended
    Newline,
}

impl LineEnding {
    /// The terminator text for this ending
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bare => "",
            Self::Newline => "\n",
        }
    }
}

/// A single `G1` linear move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMove {
    /// X target (mm)
    pub x: f64,
    /// Y target (mm)
    pub y: f64,
    /// Z target (mm)
    pub z: f64,
    /// Feed rate (mm/min)
    pub feed: f64,
}

impl LinearMove {
    /// Create a new move to `(x, y, z)` at the given feed
    pub fn new(x: f64, y: f64, z: f64, feed: f64) -> Self {
        Self { x, y, z, feed }
    }

    /// Coordinate on the given axis
    pub fn coordinate(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Check that every word of the move can be written as G-Code.
    ///
    /// `index` is the position of the move in its program and is only used
    /// for the error message.
    pub fn validate(&self, index: usize) -> Result<(), GcodeError> {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let value = self.coordinate(axis);
            if !value.is_finite() {
                return Err(GcodeError::NonFiniteValue {
                    index,
                    word: axis.word(),
                    value,
                });
            }
        }

        if !self.feed.is_finite() {
            return Err(GcodeError::NonFiniteValue {
                index,
                word: 'F',
                value: self.feed,
            });
        }
        if self.feed <= 0.0 {
            return Err(GcodeError::InvalidFeedRate {
                index,
                feed: self.feed,
            });
        }

        Ok(())
    }

    /// Render as a G-Code line with the requested termination
    pub fn render(&self, ending: LineEnding) -> String {
        format!("{}{}", self, ending.as_str())
    }
}

impl fmt::Display for LinearMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G1 X{} Y{} Z{} F{}",
            self.x, self.y, self.z, self.feed
        )
    }
}
