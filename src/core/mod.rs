//! Core data types for sample resolution.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`FileSet`]: A resolved, de-duplicated list of input files with derived views
//! - [`ReadTag`]: A read-number tag such as `_R[12]_` used to pair files
//! - [`SampleMap`]: Sample key to one or two files, read 1 first
//! - [`Pairing`]: Paired-end or single-end classification
//!
//! ## File naming
//!
//! Sample keys and pairing are deduced from file names only:
//!
//! | File                         | Read tag  | Sample | Read |
//! |------------------------------|-----------|--------|------|
//! | `S1_R1_001.fastq.gz`         | `_R[12]_` | S1     | 1    |
//! | `S1_R2_001.fastq.gz`         | `_R[12]_` | S1     | 2    |
//! | `demultiplex.S2.fastq.gz`    | none      | S2     | 1    |
//!
//! File contents are never opened.

pub mod file_set;
pub mod read_tag;
pub mod sample_map;

pub use file_set::{FileSet, FileSetError, InputPattern};
pub use read_tag::{ReadIndex, ReadTag, ReadTagError};
pub use sample_map::{Pairing, ReadFiles, SampleMap};
