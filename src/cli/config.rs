use std::path::PathBuf;

use clap::Args;

use crate::cli::samples::print_samples;
use crate::cli::OutputFormat;
use crate::input::{InputConfig, InputManager, InputMode, DEFAULT_INPUT_PATTERN};

#[derive(Args)]
pub struct ConfigArgs {
    /// Pipeline configuration file (YAML)
    #[arg(required = true)]
    pub config: PathBuf,

    /// Treat inputs as generic files, one per sample, instead of sequencing reads
    #[arg(long)]
    pub generic: bool,

    /// Pattern used when the configuration sets a directory but no input_pattern
    #[arg(long, default_value = DEFAULT_INPUT_PATTERN)]
    pub default_pattern: String,
}

/// Execute config subcommand
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or its inputs resolved.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ConfigArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = InputConfig::load_from_file(&args.config)?;
    let mode = if args.generic {
        InputMode::Generic
    } else {
        InputMode::Reads
    };

    let manager = InputManager::from_config(&config, &args.default_pattern, mode)?;

    if verbose {
        eprintln!(
            "Resolved {} sample(s) from {}",
            manager.samples().len(),
            args.config.display()
        );
    }

    print_samples(manager.pattern(), manager.samples(), manager.pairing(), format)
}
