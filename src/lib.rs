//! # lipcut
//!
//! Generates G-Code for machining a tapered lip along one edge of a
//! rectangular, bed-like workpiece. The angled cut is approximated by a
//! staircase of back-and-forth `G1` passes whose Y and Z increments keep
//! the true slope of the lip.
//!
//! ## Architecture
//!
//! lipcut is organized as a workspace with multiple crates:
//!
//! 1. **lipcut-core** - Move records, G-Code rendering, shared errors
//! 2. **lipcut-settings** - Clearance, padding and feed settings, JSON/TOML files
//! 3. **lipcut-camtools** - The lip toolpath generator and output sinks
//! 4. **lipcut** - Command-line binary that wires the crates together

pub use lipcut_camtools::{
    CamToolError, CamToolResult, ConsoleSink, FileSink, GcodeSink, LipTaperGenerator,
    LipTaperParameters, OutputTarget, ParameterError, RampBranch, StepPlan, ToolpathSummary,
};
pub use lipcut_core::{Axis, GcodeError, LineEnding, LinearMove};
pub use lipcut_settings::{GeneratorSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout carries only G-Code
/// - RUST_LOG environment variable support; when it is unset the level is
///   `warn`, or `debug` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
