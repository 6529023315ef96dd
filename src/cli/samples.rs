use clap::Args;

use crate::cli::{input_pattern, OutputFormat, SampleKeyArgs};
use crate::core::{Pairing, SampleMap};
use crate::resolving::ReadPairResolver;
use crate::utils::validation::DEFAULT_READ_TAG;

#[derive(Args)]
pub struct SamplesArgs {
    /// Glob pattern (quoted) or file path; several paths may be given
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Read tag with a '[12]' placeholder marking read 1 and read 2
    #[arg(short = 't', long, default_value = DEFAULT_READ_TAG)]
    pub read_tag: String,

    /// Single-end data: no read tag, every file is a sample
    #[arg(long)]
    pub single_end: bool,

    #[command(flatten)]
    pub keys: SampleKeyArgs,
}

/// Execute samples subcommand
///
/// # Errors
///
/// Returns an error if the files cannot be resolved into samples.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SamplesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let key_resolver = args.keys.resolver()?;
    let read_tag = if args.single_end {
        None
    } else {
        Some(args.read_tag.as_str())
    };

    let pattern = input_pattern(&args.inputs);
    let resolver = ReadPairResolver::new(pattern, read_tag, &key_resolver)?;

    if verbose {
        eprintln!(
            "Matched {} file(s) forming {} sample(s)",
            resolver.file_set().len(),
            resolver.len()
        );
    }

    let (samples, pairing) = resolver.resolve_all()?;
    print_samples(resolver.file_set().pattern(), &samples, pairing, format)
}

/// Print a sample map in the requested format
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_samples(
    pattern: &str,
    samples: &SampleMap,
    pairing: Pairing,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text_samples(pattern, samples, pairing),
        OutputFormat::Json => print_json_samples(pattern, samples, pairing)?,
        OutputFormat::Tsv => print_tsv_samples(samples),
    }
    Ok(())
}

fn print_text_samples(pattern: &str, samples: &SampleMap, pairing: Pairing) {
    println!("Sample Resolution");
    println!("{}", "=".repeat(60));

    println!("\nPattern: {pattern}");
    println!("Samples: {}", samples.len());
    println!("Reads: {pairing}");

    for (sample, files) in samples {
        println!("\n{sample}");
        println!("  R1: {}", files.read1().display());
        if let Some(read2) = files.read2() {
            println!("  R2: {}", read2.display());
        }
    }
}

fn print_json_samples(pattern: &str, samples: &SampleMap, pairing: Pairing) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "pattern": pattern,
        "paired": pairing.is_paired(),
        "pairing": pairing,
        "samples": samples,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_samples(samples: &SampleMap) {
    println!("sample\tread1\tread2");
    for (sample, files) in samples {
        println!(
            "{}\t{}\t{}",
            sample,
            files.read1().display(),
            files
                .read2()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );
    }
}
