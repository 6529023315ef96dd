use clap::Args;

use crate::cli::{input_pattern, OutputFormat, SampleKeyArgs};
use crate::core::FileSet;

#[derive(Args)]
pub struct FilesArgs {
    /// Glob pattern (quoted) or file path; several paths may be given
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub keys: SampleKeyArgs,
}

/// One matched file with its derived names
struct FileRow {
    sample: String,
    basename: String,
    extension: String,
    all_extensions: String,
    realpath: String,
}

/// Execute files subcommand
///
/// # Errors
///
/// Returns an error if the pattern cannot be resolved or sample names collide.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FilesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let file_set = FileSet::new(input_pattern(&args.inputs))?;

    if file_set.is_empty() {
        eprintln!(
            "Warning: No files found with pattern '{}'.",
            file_set.pattern()
        );
        return Ok(());
    }

    if verbose {
        eprintln!("{file_set}");
    }

    let samples = file_set.sample_keys(&args.keys.resolver()?)?;
    let rows: Vec<FileRow> = samples
        .into_iter()
        .zip(file_set.basenames())
        .zip(file_set.extension())
        .zip(file_set.all_extensions())
        .zip(file_set.realpaths())
        .map(
            |((((sample, basename), extension), all_extensions), realpath)| FileRow {
                sample,
                basename,
                extension,
                all_extensions,
                realpath: realpath.display().to_string(),
            },
        )
        .collect();

    // Files spread over several directories have no common pathname
    let directory = file_set.pathname().ok().map(|p| p.display().to_string());

    match format {
        OutputFormat::Text => print_text_files(&rows, directory.as_deref()),
        OutputFormat::Json => print_json_files(&rows, directory.as_deref())?,
        OutputFormat::Tsv => print_tsv_files(&rows),
    }

    Ok(())
}

fn print_text_files(rows: &[FileRow], directory: Option<&str>) {
    println!("Found {} file(s)", rows.len());
    println!("{}", "=".repeat(60));
    println!(
        "\nDirectory: {}",
        directory.unwrap_or("(files span several directories)")
    );

    for row in rows {
        println!("\n{}", row.sample);
        println!("  File: {}", row.basename);
        println!("  Extension: {}", row.extension);
        println!("  All extensions: {}", row.all_extensions);
        println!("  Path: {}", row.realpath);
    }
}

fn print_json_files(rows: &[FileRow], directory: Option<&str>) -> anyhow::Result<()> {
    let files: Vec<_> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "sample": row.sample,
                "basename": row.basename,
                "extension": row.extension,
                "all_extensions": row.all_extensions,
                "realpath": row.realpath,
            })
        })
        .collect();

    let output = serde_json::json!({
        "directory": directory,
        "files": files,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_files(rows: &[FileRow]) {
    println!("sample\tbasename\textension\tall_extensions\trealpath");
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            row.sample, row.basename, row.extension, row.all_extensions, row.realpath
        );
    }
}
