//! # lipcut CAM Tools
//!
//! This crate generates the G-Code for cutting a tapered lip along the edge
//! of a rectangular workpiece.
//!
//! ## CAM Tools Included
//!
//! - **Lip Taper**: Staircase approximation of an angled lip, with optional
//!   cutter radius compensation
//!
//! ## Supporting Infrastructure
//!
//! - **Sinks**: Console and file destinations for the generated program
//! - **Errors**: Parameter validation and generation errors

pub mod error;
pub mod lip_taper;
pub mod sink;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use lip_taper::{
    LipTaperGenerator, LipTaperParameters, RampBranch, StepPlan, ToolpathSummary, MAX_STEPS,
};
pub use sink::{ConsoleSink, FileSink, GcodeSink, OutputTarget};
