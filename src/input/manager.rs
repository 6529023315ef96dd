use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::{FileSet, Pairing, SampleMap};
use crate::input::config::{ConfigError, InputConfig};
use crate::resolving::{ReadPairResolver, ResolveError};

/// Pattern used when the configuration names a directory but no pattern
pub const DEFAULT_INPUT_PATTERN: &str = "*.fastq.gz";

/// How input files are turned into samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Sequencing reads, paired by read tag
    #[default]
    Reads,
    /// Any files, one per sample
    Generic,
}

/// Resolves the inputs of a pipeline run from its configuration.
///
/// The resulting sample map is handed to the workflow engine, which looks up
/// each sample through [`InputManager::wildcard_resolver`].
#[derive(Debug, Clone)]
pub struct InputManager {
    pattern: String,
    samples: SampleMap,
    pairing: Pairing,
}

impl InputManager {
    /// Resolve the samples described by a configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the input location is not usable, or a
    /// wrapped `ResolveError` if the files cannot be turned into samples.
    pub fn from_config(
        config: &InputConfig,
        default_pattern: &str,
        mode: InputMode,
    ) -> Result<Self, ConfigError> {
        let pattern = config.glob_pattern(default_pattern)?;
        let key_resolver = config.key_resolver()?;

        let (samples, pairing) = match mode {
            InputMode::Reads => {
                let resolver =
                    ReadPairResolver::new(pattern.as_str(), config.read_tag(), &key_resolver)?;
                resolver.resolve_all()?
            }
            InputMode::Generic => {
                let file_set = FileSet::new(pattern.as_str()).map_err(ResolveError::from)?;
                if file_set.is_empty() {
                    warn!(pattern = %pattern, "No files found with the pattern");
                } else {
                    info!(files = file_set.len(), "Found files matching the pattern");
                }
                (key_resolver.resolve(&file_set)?, Pairing::SingleEnded)
            }
        };

        Ok(Self {
            pattern,
            samples,
            pairing,
        })
    }

    /// The glob the samples were resolved from
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn samples(&self) -> &SampleMap {
        &self.samples
    }

    #[must_use]
    pub fn pairing(&self) -> Pairing {
        self.pairing
    }

    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.pairing.is_paired()
    }

    /// Sample key to paths, for workflow wildcard substitution
    pub fn wildcard_resolver(&self) -> impl Fn(&str) -> Option<Vec<PathBuf>> + '_ {
        self.samples.wildcard_resolver()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        dir
    }

    fn config_for(dir: &tempfile::TempDir, extra: &str) -> InputConfig {
        InputConfig::from_yaml(&format!(
            "input_directory: {}\n{extra}",
            dir.path().display()
        ))
        .unwrap()
    }

    #[test]
    fn test_reads_mode_with_default_tag() {
        let dir = fixture(&["A_R1_.fastq.gz", "A_R2_.fastq.gz", "B_R1_.fastq.gz", "B_R2_.fastq.gz"]);
        let manager =
            InputManager::from_config(&config_for(&dir, ""), DEFAULT_INPUT_PATTERN, InputMode::Reads)
                .unwrap();

        assert!(manager.is_paired());
        assert_eq!(manager.samples().keys().collect::<Vec<_>>(), vec!["A", "B"]);

        let resolve = manager.wildcard_resolver();
        assert_eq!(resolve("A").unwrap().len(), 2);
        assert!(resolve("C").is_none());
    }

    #[test]
    fn test_reads_mode_without_tag() {
        let dir = fixture(&["A.fastq.gz", "B.fastq.gz"]);
        let manager = InputManager::from_config(
            &config_for(&dir, "input_readtag: null\n"),
            DEFAULT_INPUT_PATTERN,
            InputMode::Reads,
        )
        .unwrap();

        assert_eq!(manager.pairing(), Pairing::SingleEnded);
        assert_eq!(manager.samples().len(), 2);
    }

    #[test]
    fn test_generic_mode() {
        let dir = fixture(&["run.A.sorted.bam", "run.B.sorted.bam", "notes.txt"]);
        let manager = InputManager::from_config(
            &config_for(&dir, "input_pattern: '*.bam'\n"),
            DEFAULT_INPUT_PATTERN,
            InputMode::Generic,
        )
        .unwrap();

        assert_eq!(manager.samples().keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(!manager.is_paired());
    }

    #[test]
    fn test_generic_mode_without_match_is_empty() {
        let dir = fixture(&[]);
        let manager = InputManager::from_config(
            &config_for(&dir, ""),
            DEFAULT_INPUT_PATTERN,
            InputMode::Generic,
        )
        .unwrap();
        assert!(manager.samples().is_empty());
    }

    #[test]
    fn test_resolution_errors_are_wrapped() {
        let dir = fixture(&["A.fastq.gz"]);
        let err = InputManager::from_config(&config_for(&dir, ""), DEFAULT_INPUT_PATTERN, InputMode::Reads)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Resolve(ResolveError::NoSamplesFound { .. })
        ));
    }
}
