//! # sample-solver
//!
//! A library for deducing sample names and read pairing from sequencing file names.
//!
//! Sequencing runs deliver reads as files whose names encode the sample, the lane,
//! and the read number, with conventions that vary between instruments and
//! demultiplexing tools. Pipelines need a clean sample name for each file and must
//! know whether reads come in pairs.
//!
//! `sample-solver` recovers both from the file names alone, without opening any file.
//!
//! ## Features
//!
//! - **Pattern resolution**: Literal paths, path lists, and recursive globs
//! - **Prefix stripping**: Removes leading name tokens shared by every file
//! - **Templates**: `{sample}` templates for names the heuristic cannot handle
//! - **Read pairing**: Groups `_R1_`/`_R2_` (or any tag) files into samples
//! - **Consistency checks**: Rejects colliding names and mixed paired/single-end sets
//!
//! ## Example
//!
//! ```rust,no_run
//! use sample_solver::{ReadPairResolver, SampleKeyResolver};
//!
//! let keys = SampleKeyResolver::new().with_extra_prefixes(&["demultiplex"]);
//! let resolver = ReadPairResolver::new("data/*.fastq.gz", Some("_R[12]_"), &keys).unwrap();
//! let (samples, pairing) = resolver.resolve_all().unwrap();
//!
//! for (sample, files) in &samples {
//!     println!("{sample}: {:?}", files.to_vec());
//! }
//! println!("Reads are {pairing}");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: File sets, read tags, and sample maps
//! - [`resolving`]: Sample key inference and read pairing
//! - [`input`]: Pipeline configuration inputs
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod input;
pub mod resolving;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::{FileSet, InputPattern, Pairing, ReadFiles, ReadIndex, ReadTag, SampleMap};
pub use input::{InputConfig, InputManager, InputMode};
pub use resolving::read_pairs::resolve_read_pairs;
pub use resolving::sample_keys::resolve_sample_keys;
pub use resolving::{ReadPairResolver, ResolveError, SampleKeyResolver};
