use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lipcut::{
    init_logging, GeneratorSettings, LipTaperGenerator, LipTaperParameters, OutputTarget,
};
use tracing::{debug, info, warn};

const LIP_DIAGRAM: &str = r"
Generate G-code for cutting a tapered lip along the edge of a workpiece.

                                 ^
                                 | z
         ________________    <-y- (x) length
        |                |
        |                 \       |
        |                  \      |
        |                   \   depth
        |                    \    |
        |                     \   |
        |_______________________|

                          -width-
";

#[derive(Parser, Debug)]
#[command(name = "lipcut", version = lipcut::LONG_VERSION, about, long_about = LIP_DIAGRAM)]
struct Cli {
    /// The length of the lip in mm
    #[arg(allow_negative_numbers = true)]
    length: f64,

    /// The width of the lip in mm
    #[arg(allow_negative_numbers = true)]
    width: f64,

    /// The depth of the lip in mm
    #[arg(allow_negative_numbers = true)]
    depth: f64,

    /// Path to the output file; prints to stdout when omitted
    #[arg(long)]
    path: Option<PathBuf>,

    /// Largest step in mm along Y or Z. Below 45 degrees Y uses this step
    /// and Z a smaller one; above 45 degrees the roles swap.
    #[arg(
        long = "max_step",
        visible_alias = "max-step",
        default_value_t = 1.0,
        allow_negative_numbers = true
    )]
    max_step: f64,

    /// Cutter radius in mm, used to compensate the position of the cuts
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    radius: f64,

    /// Generator settings file (.json or .toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => GeneratorSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => GeneratorSettings::default(),
    };

    let params = LipTaperParameters::new(cli.length, cli.width, cli.depth)
        .with_max_step(cli.max_step)
        .with_radius(cli.radius);
    debug!(?params, ?settings, "Parsed command line");

    let generator = LipTaperGenerator::new(params).with_settings(settings);
    let summary = generator.summary()?;
    info!(
        branch = %summary.branch,
        num_steps = summary.num_steps,
        moves = summary.move_count,
        "Planned lip toolpath"
    );
    if summary.dropped_trailing_step {
        warn!(
            num_steps = summary.num_steps,
            "Odd step count: the last step has no return pass and is not cut"
        );
    }

    let target = OutputTarget::from_path(cli.path);
    generator
        .write_to(&target)
        .with_context(|| format!("Failed to write G-code to {}", target))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["lipcut", "100", "50", "20"]).unwrap();
        assert_eq!(cli.length, 100.0);
        assert_eq!(cli.width, 50.0);
        assert_eq!(cli.depth, 20.0);
        assert_eq!(cli.max_step, 1.0);
        assert_eq!(cli.radius, 0.0);
        assert!(cli.path.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "lipcut",
            "100",
            "50",
            "20",
            "--max_step",
            "0.5",
            "--radius",
            "3",
            "--path",
            "lip.nc",
        ])
        .unwrap();
        assert_eq!(cli.max_step, 0.5);
        assert_eq!(cli.radius, 3.0);
        assert_eq!(cli.path, Some(PathBuf::from("lip.nc")));

        let cli = Cli::try_parse_from(["lipcut", "1", "2", "3", "--max-step", "2"]).unwrap();
        assert_eq!(cli.max_step, 2.0);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = Cli::try_parse_from(["lipcut", "10", "-5", "2"]).unwrap();
        assert_eq!(cli.width, -5.0);
        assert!(run(cli).is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["lipcut", "100", "50"]).is_err());
        assert!(Cli::try_parse_from(["lipcut", "100", "fifty", "20"]).is_err());
        assert!(Cli::try_parse_from(["lipcut", "1", "2", "3", "--max_step", "x"]).is_err());
    }
}
