//! Pipeline input resolution from a configuration file.
//!
//! A pipeline configuration names where its reads live and how they are tagged:
//!
//! | Key                       | Meaning                                         |
//! |---------------------------|-------------------------------------------------|
//! | `input_directory`         | Directory searched with `input_pattern`         |
//! | `input_pattern`           | Glob, joined to the directory when one is given |
//! | `input_readtag`           | Read tag such as `_R[12]_`, null for single-end |
//! | `extra_prefixes_to_strip` | Prefixes removed from every sample name         |
//! | `sample_pattern`          | Template such as `{sample}_sorted.bam`          |
//!
//! [`InputManager`] reads these keys and produces the sample map.

pub mod config;
pub mod manager;

pub use config::{ConfigError, InputConfig};
pub use manager::{InputManager, InputMode, DEFAULT_INPUT_PATTERN};
