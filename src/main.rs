use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod input;
mod resolving;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("sample_solver=debug,info")
    } else {
        EnvFilter::new("sample_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Samples(args) => {
            cli::samples::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Files(args) => {
            cli::files::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Config(args) => {
            cli::config::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
