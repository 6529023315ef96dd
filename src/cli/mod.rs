//! Command-line interface for sample-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **samples**: Resolve sample names and read pairs from a set of files
//! - **files**: List the files matched by a pattern with their derived names
//! - **config**: Resolve the inputs described by a pipeline configuration file
//!
//! ## Usage
//!
//! ```text
//! # Paired reads named SAMPLE_R1_001.fastq.gz / SAMPLE_R2_001.fastq.gz
//! sample-solver samples 'data/*.fastq.gz'
//!
//! # Reads named SAMPLE_1.fq.gz / SAMPLE_2.fq.gz
//! sample-solver samples 'data/*.fq.gz' --read-tag '_[12].'
//!
//! # Long reads, no pairing, shared prefix removed from names
//! sample-solver samples 'ccs/*.fastq.gz' --single-end --extra-prefix demultiplex
//!
//! # JSON output for scripting
//! sample-solver samples 'data/*.fastq.gz' --format json
//!
//! # Inputs of a pipeline
//! sample-solver config config.yaml
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::InputPattern;
use crate::resolving::{ResolveError, SampleKeyResolver};

pub mod config;
pub mod files;
pub mod samples;

#[derive(Parser)]
#[command(name = "sample-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Infer sample names and read pairing from sequencing file names")]
#[command(
    long_about = "sample-solver finds the files matching a pattern and deduces, from their names only:\n- A unique sample name for each file or pair of files\n- Whether the reads are paired-end or single-end\n\nCommon prefixes are removed from names automatically. Use --extra-prefix or --sample-pattern when names need more help."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve samples and read pairs from files
    Samples(samples::SamplesArgs),

    /// List matched files and their sample names
    Files(files::FilesArgs),

    /// Resolve the inputs of a pipeline configuration file
    Config(config::ConfigArgs),
}

/// Options controlling how sample names are derived from file names
#[derive(Args)]
pub struct SampleKeyArgs {
    /// Prefix to remove from every sample name (repeatable); a trailing dot is implied
    #[arg(long = "extra-prefix", value_name = "PREFIX")]
    pub extra_prefixes: Vec<String>,

    /// Template locating the sample in file names, e.g. '{sample}_sorted.fastq.gz'
    #[arg(long, value_name = "TEMPLATE")]
    pub sample_pattern: Option<String>,
}

impl SampleKeyArgs {
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidSamplePattern` for a malformed template.
    pub fn resolver(&self) -> Result<SampleKeyResolver, ResolveError> {
        SampleKeyResolver::from_options(
            self.extra_prefixes.as_slice(),
            self.sample_pattern.as_deref(),
        )
    }
}

/// A single argument is a glob or path; several arguments are explicit paths
#[must_use]
pub fn input_pattern(inputs: &[String]) -> InputPattern {
    match inputs {
        [single] => InputPattern::Glob(single.clone()),
        many => InputPattern::Paths(many.iter().map(PathBuf::from).collect()),
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
