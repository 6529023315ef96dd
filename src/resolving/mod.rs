//! Sample key inference and read pairing.
//!
//! This module turns a [`FileSet`](crate::core::FileSet) into a
//! [`SampleMap`](crate::core::SampleMap):
//!
//! - [`SampleKeyResolver`]: One key per file, by common-prefix stripping, caller
//!   supplied extra prefixes, or a `{sample}` template
//! - [`ReadPairResolver`]: Groups files by read tag and classifies the set as
//!   paired-end or single-end
//!
//! ## Prefix stripping
//!
//! Basenames are split on `.` and leading tokens shared by every file are removed:
//!
//! ```text
//! demultiplex.A.fastq.gz  ->  A
//! demultiplex.B.fastq.gz  ->  B
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use sample_solver::resolving::read_pairs::resolve_read_pairs;
//!
//! let (samples, pairing) = resolve_read_pairs("data/*.fastq.gz", Some("_R[12]_"), &[] as &[&str], None).unwrap();
//! for (sample, files) in &samples {
//!     println!("{sample}: {}", files.read1().display());
//! }
//! println!("{pairing}");
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::{FileSetError, ReadTagError};

pub mod read_pairs;
pub mod sample_keys;

pub use read_pairs::ReadPairResolver;
pub use sample_keys::{SampleKeyResolver, SampleTemplate};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    FileSet(#[from] FileSetError),

    #[error(transparent)]
    ReadTag(#[from] ReadTagError),

    #[error("Invalid sample pattern '{0}': it must contain '{{sample}}' exactly once")]
    InvalidSamplePattern(String),

    #[error("Sample pattern '{pattern}' does not match the filename {filename}")]
    PatternMismatch { pattern: String, filename: String },

    #[error(
        "Sample names are not unique. After removing common prefixes {prefixes:?}, we end up with {keys:?}{}. \
         Provide extra prefixes to strip or a sample pattern",
        describe_token(.ambiguous_token.as_ref())
    )]
    AmbiguousSampleNames {
        prefixes: Vec<String>,
        keys: Vec<String>,
        ambiguous_token: Option<AmbiguousToken>,
    },

    #[error(
        "No samples found with pattern '{pattern}' and read tag '{read_tag}'. \
         If your data is not paired, do not set a read tag"
    )]
    NoSamplesFound { pattern: String, read_tag: String },

    #[error("Found no file for sample '{tag}'. Files must contain the tag '{read_tag}'")]
    MissingRead1 { tag: String, read_tag: String },

    #[error(
        "Found too many candidates for sample '{tag}' with tag '{read_tag}': {}",
        display_candidates(.candidates)
    )]
    AmbiguousCandidate {
        tag: String,
        read_tag: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Unknown sample tag '{0}'")]
    UnknownTag(String),

    #[error("Ambiguous sample: {0} samples found, one must be named")]
    TagRequired(usize),

    #[error(
        "Mix of paired and single-end data with pattern '{pattern}': \
         {read1} file(s) for read 1 and {read2} file(s) for read 2"
    )]
    InconsistentPairing {
        pattern: String,
        read1: usize,
        read2: usize,
    },
}

/// The first name token that was neither shared by every file nor unique per file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousToken {
    pub index: usize,
    pub values: Vec<String>,
}

impl fmt::Display for AmbiguousToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "token {} has {} distinct values ({})",
            self.index + 1,
            self.values.len(),
            self.values.join(", ")
        )
    }
}

fn describe_token(token: Option<&AmbiguousToken>) -> String {
    token.map(|t| format!(" ({t})")).unwrap_or_default()
}

fn display_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
