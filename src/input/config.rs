use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::resolving::{ResolveError, SampleKeyResolver};
use crate::utils::validation::DEFAULT_READ_TAG;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("input_directory must be found in the config file")]
    MissingInputDirectory,

    #[error("The input directory ({}) does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No valid input provided in the config file: set input_directory or input_pattern")]
    NoInput,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// The input section of a pipeline configuration file.
///
/// Only these keys are read; everything else in the file is ignored.
///
/// ```yaml
/// input_directory: /data/run1
/// input_pattern: "*.fastq.gz"
/// input_readtag: _R[12]_
/// extra_prefixes_to_strip: [demultiplex]
/// sample_pattern: null
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// `None` when the key is absent, `Some(None)` when it is null
    #[serde(default, deserialize_with = "present")]
    pub input_directory: Option<Option<String>>,

    #[serde(default)]
    pub input_pattern: Option<String>,

    /// `None` when the key is absent, `Some(None)` when it is null
    #[serde(default, deserialize_with = "present")]
    pub input_readtag: Option<Option<String>>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub extra_prefixes_to_strip: Vec<String>,

    #[serde(default)]
    pub sample_pattern: Option<String>,
}

/// Distinguishes a null value from an absent key
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl InputConfig {
    /// Load the input section from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read or
    /// `ConfigError::Yaml` if it is not valid YAML.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse the input section from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Yaml` if the text is not valid YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The glob to resolve: `input_directory` joined with `input_pattern`
    /// (or `default_pattern`), else `input_pattern` alone
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingInputDirectory` if the key is absent,
    /// `ConfigError::DirectoryNotFound` if the directory does not exist, or
    /// `ConfigError::NoInput` if neither a directory nor a pattern is set.
    pub fn glob_pattern(&self, default_pattern: &str) -> Result<String, ConfigError> {
        let directory = self
            .input_directory
            .as_ref()
            .ok_or(ConfigError::MissingInputDirectory)?;
        let pattern = non_blank(self.input_pattern.as_ref());

        if let Some(directory) = non_blank(directory.as_ref()) {
            let directory = Path::new(directory);
            if !directory.is_dir() {
                return Err(ConfigError::DirectoryNotFound(directory.to_path_buf()));
            }
            let joined = directory.join(pattern.unwrap_or(default_pattern));
            return Ok(joined.to_string_lossy().into_owned());
        }

        pattern.map(str::to_string).ok_or(ConfigError::NoInput)
    }

    /// The read tag to pair files with, `None` for single-end data
    ///
    /// An absent key falls back to `_R[12]_`; a null or blank value disables pairing.
    #[must_use]
    pub fn read_tag(&self) -> Option<&str> {
        match &self.input_readtag {
            None => {
                warn!(
                    default = DEFAULT_READ_TAG,
                    "No input_readtag option found in the config file, using the default"
                );
                Some(DEFAULT_READ_TAG)
            }
            Some(tag) => non_blank(tag.as_ref()),
        }
    }

    /// Sample key options as a resolver
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidSamplePattern` for a malformed `sample_pattern`.
    pub fn key_resolver(&self) -> Result<SampleKeyResolver, ResolveError> {
        SampleKeyResolver::from_options(
            self.extra_prefixes_to_strip.as_slice(),
            non_blank(self.sample_pattern.as_ref()),
        )
    }
}
