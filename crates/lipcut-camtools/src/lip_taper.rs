//! Tapered lip toolpath.
//!
//! Cuts a straight angled lip along one edge of a rectangular workpiece by
//! approximating the diagonal with a staircase of axis-aligned passes.
//! Looking down the X axis:
//!
//! ```text
//!      ________________    <- Y
//!     |                |
//!     |                 \        |
//!     |                  \     depth
//!     |                   \      |
//!     |_____________________\
//!                      |-width-|
//! ```
//!
//! The axis with the larger extent advances by `max_step` on every step and
//! the other by a proportionally smaller amount, so the stairs follow the
//! true slope of the cut. Passes run the full X span and alternate
//! direction, odd steps heading towards X0 and even steps back to the
//! X stop.

use crate::error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
use crate::sink::{ConsoleSink, FileSink, GcodeSink, OutputTarget};
use lipcut_core::{GcodeError, LineEnding, LinearMove};
use lipcut_settings::GeneratorSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Parameters for the tapered lip CAM tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LipTaperParameters {
    /// Length of the lip along X (mm)
    pub length: f64,
    /// Width of the lip along Y, before radius compensation (mm)
    pub width: f64,
    /// Full depth of the lip along Z (mm)
    pub depth: f64,
    /// Largest Y or Z increment per step (mm)
    #[serde(default = "default_max_step")]
    pub max_step: f64,
    /// Cutter radius, subtracted from the width (mm)
    #[serde(default)]
    pub radius: f64,
}

fn default_max_step() -> f64 {
    1.0
}

impl LipTaperParameters {
    /// Parameters with the default step of 1 mm and no radius compensation
    pub fn new(length: f64, width: f64, depth: f64) -> Self {
        Self {
            length,
            width,
            depth,
            max_step: default_max_step(),
            radius: 0.0,
        }
    }

    /// Set the maximum step size
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    /// Set the cutter radius
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Width left to cut once the cutter radius is taken off
    pub fn effective_width(&self) -> f64 {
        self.width - self.radius
    }

    /// Reject dimensions that would give a degenerate or undefined toolpath
    pub fn validate(&self) -> ParameterResult<()> {
        let fields = [
            ("length", self.length),
            ("width", self.width),
            ("depth", self.depth),
            ("max_step", self.max_step),
            ("radius", self.radius),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("{} is not a finite number", value),
                });
            }
        }

        if self.max_step <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "max_step".to_string(),
                reason: format!("must be greater than zero, got {}", self.max_step),
            });
        }

        for (name, value) in [("length", self.length), ("radius", self.radius)] {
            if value < 0.0 {
                return Err(ParameterError::OutOfRange {
                    name: name.to_string(),
                    value,
                    min: 0.0,
                    max: f64::INFINITY,
                });
            }
        }

        if self.depth <= 0.0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "depth must be positive, got {}",
                self.depth
            )));
        }

        let width = self.effective_width();
        if width <= 0.0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "width {} minus radius {} leaves {} to cut",
                self.width, self.radius, width
            )));
        }

        // The driving axis is whichever of width and depth is larger.
        let extent = width.max(self.depth);
        let steps = extent / self.max_step;
        if !steps.is_finite() || steps > MAX_STEPS as f64 {
            return Err(ParameterError::OutOfRange {
                name: "max_step".to_string(),
                value: self.max_step,
                min: extent / MAX_STEPS as f64,
                max: f64::INFINITY,
            });
        }

        Ok(())
    }
}

/// Upper bound on the number of staircase steps in one program
pub const MAX_STEPS: usize = 1_000_000;

/// Which axis drives the staircase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RampBranch {
    /// `depth <= width`: Y advances by `max_step`, Z by less
    Shallow,
    /// `depth > width`: Z advances by `max_step`, Y by less
    Steep,
}

impl fmt::Display for RampBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shallow => write!(f, "shallow"),
            Self::Steep => write!(f, "steep"),
        }
    }
}

/// Step geometry derived from the parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepPlan {
    /// Axis driving the staircase
    pub branch: RampBranch,
    /// X position of the far end of every pass
    pub x_stop: f64,
    /// Radius-compensated width
    pub width: f64,
    /// Y increment per step
    pub y_step: f64,
    /// Z increment per step
    pub z_step: f64,
    /// Number of increments along the driving axis
    pub num_steps: usize,
}

impl StepPlan {
    /// Validate `params` and derive the step geometry
    pub fn compute(
        params: &LipTaperParameters,
        settings: &GeneratorSettings,
    ) -> CamToolResult<Self> {
        params.validate()?;
        settings.validate()?;

        let x_stop = params.length + settings.length_padding;
        let width = params.effective_width();
        let depth = params.depth;
        let max_step = params.max_step;

        let plan = if depth <= width {
            Self {
                branch: RampBranch::Shallow,
                x_stop,
                width,
                y_step: max_step,
                z_step: max_step * depth / width,
                num_steps: (width / max_step).floor() as usize,
            }
        } else {
            Self {
                branch: RampBranch::Steep,
                x_stop,
                width,
                y_step: max_step * width / depth,
                z_step: max_step,
                num_steps: (depth / max_step).floor() as usize,
            }
        };

        debug!(
            branch = %plan.branch,
            x_stop = plan.x_stop,
            y_step = plan.y_step,
            z_step = plan.z_step,
            num_steps = plan.num_steps,
            "Computed lip step plan"
        );
        Ok(plan)
    }

    /// Number of (odd, even) step pairs that are cut
    pub fn raster_pairs(&self) -> usize {
        self.num_steps / 2
    }

    /// An odd step count leaves the last step without a partner; it is not cut.
    pub fn drops_trailing_step(&self) -> bool {
        self.num_steps % 2 == 1
    }

    /// Total number of moves in the program, `None` if it does not fit a `usize`
    pub fn move_count(&self) -> Option<usize> {
        self.raster_pairs()
            .checked_mul(4)?
            .checked_add(APPROACH_MOVES + RETRACT_MOVES)
    }

    /// Y position at the given step
    pub fn y_at(&self, step: usize) -> f64 {
        self.width - step as f64 * self.y_step
    }

    /// Z position at the given step
    pub fn z_at(&self, step: usize) -> f64 {
        -(step as f64) * self.z_step
    }

    /// Moves of the full program, in order
    pub fn moves<'a>(
        &'a self,
        settings: &'a GeneratorSettings,
    ) -> impl Iterator<Item = LinearMove> + 'a {
        let feed = settings.feed_rate;
        let clearance = settings.clearance_height;

        let approach = [
            LinearMove::new(0.0, self.width, clearance, settings.approach_feed_rate),
            LinearMove::new(0.0, self.width, 0.0, settings.approach_feed_rate),
            LinearMove::new(self.x_stop, self.width, 0.0, feed),
        ];

        let odd_steps = (1..=self.num_steps).step_by(2);
        let even_steps = (2..=self.num_steps).step_by(2);
        let raster = odd_steps.zip(even_steps).flat_map(move |(right, left)| {
            [
                LinearMove::new(self.x_stop, self.y_at(right), self.z_at(right), feed),
                LinearMove::new(0.0, self.y_at(right), self.z_at(right), feed),
                LinearMove::new(0.0, self.y_at(left), self.z_at(left), feed),
                LinearMove::new(self.x_stop, self.y_at(left), self.z_at(left), feed),
            ]
        });

        // Every pair ends at the X stop; with no pairs the cutter is still
        // at the end of the approach.
        let last_step = 2 * self.raster_pairs();
        let retract = LinearMove::new(self.x_stop, self.y_at(last_step), clearance, feed);

        approach
            .into_iter()
            .chain(raster)
            .chain(std::iter::once(retract))
    }
}

const APPROACH_MOVES: usize = 3;
const RETRACT_MOVES: usize = 1;

/// Overview of a generated program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolpathSummary {
    /// Axis driving the staircase
    pub branch: RampBranch,
    /// Y increment per step
    pub y_step: f64,
    /// Z increment per step
    pub z_step: f64,
    /// Number of increments along the driving axis
    pub num_steps: usize,
    /// Step pairs that are cut
    pub raster_pairs: usize,
    /// Whether an unpaired last step was dropped
    pub dropped_trailing_step: bool,
    /// Total number of `G1` moves
    pub move_count: usize,
}

impl TryFrom<&StepPlan> for ToolpathSummary {
    type Error = CamToolError;

    fn try_from(plan: &StepPlan) -> CamToolResult<Self> {
        let move_count = plan.move_count().ok_or_else(|| {
            CamToolError::GenerationFailed(format!(
                "{} steps give more moves than can be counted",
                plan.num_steps
            ))
        })?;

        Ok(Self {
            branch: plan.branch,
            y_step: plan.y_step,
            z_step: plan.z_step,
            num_steps: plan.num_steps,
            raster_pairs: plan.raster_pairs(),
            dropped_trailing_step: plan.drops_trailing_step(),
            move_count,
        })
    }
}

/// Generator for tapered lip G-Code
pub struct LipTaperGenerator {
    params: LipTaperParameters,
    settings: GeneratorSettings,
}

impl LipTaperGenerator {
    /// Create a new generator with default settings
    pub fn new(params: LipTaperParameters) -> Self {
        Self {
            params,
            settings: GeneratorSettings::default(),
        }
    }

    /// Replace the generator settings
    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn params(&self) -> &LipTaperParameters {
        &self.params
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Derive the step plan
    pub fn plan(&self) -> CamToolResult<StepPlan> {
        StepPlan::compute(&self.params, &self.settings)
    }

    /// Summarise the program without rendering it
    pub fn summary(&self) -> CamToolResult<ToolpathSummary> {
        ToolpathSummary::try_from(&self.plan()?)
    }

    /// All moves of the program
    pub fn moves(&self) -> CamToolResult<Vec<LinearMove>> {
        let plan = self.plan()?;
        Ok(plan.moves(&self.settings).collect())
    }

    /// Generate the program as newline-terminated text
    pub fn generate(&self) -> CamToolResult<String> {
        let plan = self.plan()?;
        let mut gcode = String::new();
        for (index, mv) in plan.moves(&self.settings).enumerate() {
            mv.validate(index)?;
            gcode.push_str(&mv.render(LineEnding::Newline));
        }
        Ok(gcode)
    }

    /// Stream the program into `sink`, returning the number of moves written
    ///
    /// Nothing is written if the parameters are invalid.
    pub fn write_program(&self, sink: &mut dyn GcodeSink) -> CamToolResult<usize> {
        let plan = self.plan()?;
        let ending = sink.line_ending();

        let mut written = 0;
        for (index, mv) in plan.moves(&self.settings).enumerate() {
            mv.validate(index)?;
            sink.write_record(&mv.render(ending))
                .map_err(|e| GcodeError::output(index, e))?;
            written += 1;
        }
        sink.finish().map_err(|e| GcodeError::output(written, e))?;

        Ok(written)
    }

    /// Write the program to standard output or a file
    pub fn write_to(&self, target: &OutputTarget) -> CamToolResult<usize> {
        // Validate before touching the target so a bad call never
        // truncates an existing file.
        self.plan()?;

        let written = match target {
            OutputTarget::Stdout => self.write_program(&mut ConsoleSink::stdout())?,
            OutputTarget::File(path) => {
                let mut sink = FileSink::create(path)?;
                debug!(path = %sink.path().display(), "Opened output file");
                self.write_program(&mut sink)?
            }
        };

        info!(target_path = %target, moves = written, "Wrote lip toolpath");
        Ok(written)
    }
}
