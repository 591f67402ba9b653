//! # lipcut Core
//!
//! Core types and utilities for lipcut.
//! Provides the `G1` move record, its G-Code rendering, and the G-Code
//! error type shared by the generator crates.

pub mod error;
pub mod motion;

pub use error::GcodeError;
pub use motion::{Axis, LineEnding, LinearMove};
