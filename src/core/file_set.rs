use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use thiserror::Error;
use tracing::debug;

use crate::resolving::sample_keys::SampleKeyResolver;
use crate::resolving::ResolveError;

#[derive(Error, Debug)]
pub enum FileSetError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Found more than one directory: {}", display_paths(.0))]
    AmbiguousPath(Vec<PathBuf>),

    #[error("No input files found with pattern '{0}'")]
    NoFilesFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// What a [`FileSet`] is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPattern {
    /// A path to an existing file, or a glob expression (`**` is recursive)
    Glob(String),
    /// Explicit paths, all of which must exist
    Paths(Vec<PathBuf>),
}

impl InputPattern {
    fn describe(&self) -> String {
        match self {
            Self::Glob(pattern) => pattern.clone(),
            Self::Paths(paths) => display_paths(paths),
        }
    }
}

impl From<&str> for InputPattern {
    fn from(pattern: &str) -> Self {
        Self::Glob(pattern.to_string())
    }
}

impl From<String> for InputPattern {
    fn from(pattern: String) -> Self {
        Self::Glob(pattern)
    }
}

impl From<Vec<PathBuf>> for InputPattern {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::Paths(paths)
    }
}

impl From<&[PathBuf]> for InputPattern {
    fn from(paths: &[PathBuf]) -> Self {
        Self::Paths(paths.to_vec())
    }
}

/// A resolved, de-duplicated set of input files.
///
/// Directories are never part of a file set. The set is a snapshot: it is not
/// refreshed when the filesystem changes, build a new one instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    pattern: String,
    paths: Vec<PathBuf>,
    realpaths: Vec<PathBuf>,
}

impl FileSet {
    /// Resolve a pattern into a file set
    ///
    /// # Errors
    ///
    /// Returns `FileSetError::NotFound` if an explicit path does not exist,
    /// `FileSetError::InvalidPattern` for a malformed glob, or
    /// `FileSetError::Io` if a matched entry cannot be read.
    pub fn new(pattern: impl Into<InputPattern>) -> Result<Self, FileSetError> {
        let pattern = pattern.into();
        let candidates = match &pattern {
            InputPattern::Glob(glob_pattern) => expand_glob(glob_pattern)?,
            InputPattern::Paths(paths) => {
                for path in paths {
                    if !path.exists() {
                        return Err(FileSetError::NotFound(path.clone()));
                    }
                }
                paths.clone()
            }
        };

        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(candidates.len());
        let mut realpaths = Vec::with_capacity(candidates.len());
        for path in candidates {
            if path.is_dir() {
                continue;
            }
            let real = realpath(&path)?;
            if !seen.insert(real.clone()) {
                continue;
            }
            realpaths.push(real);
            paths.push(path);
        }

        Ok(Self {
            pattern: pattern.describe(),
            paths,
            realpaths,
        })
    }

    /// The pattern this set was resolved from
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths as matched (relative when the pattern was relative)
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Canonical absolute paths, in the same order as [`FileSet::paths`]
    #[must_use]
    pub fn realpaths(&self) -> &[PathBuf] {
        &self.realpaths
    }

    /// Final path segments (e.g. `A_R1_.fastq.gz`)
    #[must_use]
    pub fn basenames(&self) -> Vec<String> {
        self.paths.iter().map(|p| basename(p)).collect()
    }

    /// Final dotted suffix of each file, dot included (e.g. `.gz`), or empty
    #[must_use]
    pub fn extension(&self) -> Vec<String> {
        self.paths
            .iter()
            .map(|p| {
                p.extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Everything after the first dot of each basename (e.g. `fastq.gz`), or empty
    #[must_use]
    pub fn all_extensions(&self) -> Vec<String> {
        self.basenames()
            .iter()
            .map(|b| b.split_once('.').map(|(_, rest)| rest.to_string()).unwrap_or_default())
            .collect()
    }

    /// Directory of each canonical path
    #[must_use]
    pub fn pathnames(&self) -> Vec<PathBuf> {
        self.realpaths
            .iter()
            .map(|p| p.parent().map(Path::to_path_buf).unwrap_or_default())
            .collect()
    }

    /// The single directory shared by every file
    ///
    /// # Errors
    ///
    /// Returns `FileSetError::NoFilesFound` if the set is empty, or
    /// `FileSetError::AmbiguousPath` if the files live in more than one directory.
    pub fn pathname(&self) -> Result<PathBuf, FileSetError> {
        let distinct: BTreeSet<PathBuf> = self.pathnames().into_iter().collect();
        match distinct.len() {
            0 => Err(FileSetError::NoFilesFound(self.pattern.clone())),
            1 => Ok(distinct.into_iter().next().unwrap_or_default()),
            _ => Err(FileSetError::AmbiguousPath(distinct.into_iter().collect())),
        }
    }

    /// One sample key per file, in file order
    ///
    /// # Errors
    ///
    /// See [`SampleKeyResolver::sample_keys`].
    pub fn sample_keys(&self, resolver: &SampleKeyResolver) -> Result<Vec<String>, ResolveError> {
        resolver.sample_keys(self)
    }

    /// Keep only the files whose basename satisfies `keep`
    #[must_use]
    pub fn filter_basenames(&self, keep: impl Fn(&str) -> bool) -> Self {
        let (paths, realpaths) = self
            .paths
            .iter()
            .zip(&self.realpaths)
            .filter(|(path, _)| keep(&basename(path)))
            .map(|(p, r)| (p.clone(), r.clone()))
            .unzip();

        Self {
            pattern: self.pattern.clone(),
            paths,
            realpaths,
        }
    }
}

impl fmt::Display for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} file(s)", self.len())
    }
}

/// Final path segment as a string
#[must_use]
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, FileSetError> {
    if Path::new(pattern).exists() {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    // Hidden files only match when the pattern spells out the leading dot
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let entries = glob::glob_with(pattern, options).map_err(|source| FileSetError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry.map_err(glob::GlobError::into_error)?);
    }
    debug!(pattern, matches = paths.len(), "Expanded glob pattern");
    Ok(paths)
}

fn realpath(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(real) => Ok(real),
        // Dangling symlinks still get an absolute path
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Could not canonicalize path");
            Ok(std::env::current_dir()?.join(path))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(&path, b"").unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_glob_excludes_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["A.fastq.gz", "B.fastq.gz"]);
        fs::create_dir(dir.path().join("C.fastq.gz")).unwrap();

        let pattern = format!("{}/*.fastq.gz", dir.path().display());
        let set = FileSet::new(pattern.as_str()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.basenames(), vec!["A.fastq.gz", "B.fastq.gz"]);
    }

    #[test]
    fn test_recursive_glob() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["run1/A.fastq.gz", "run2/deep/B.fastq.gz", "C.txt"]);

        let pattern = format!("{}/**/*.fastq.gz", dir.path().display());
        let set = FileSet::new(pattern).unwrap();
        assert_eq!(set.len(), 2);
        assert!(matches!(set.pathname(), Err(FileSetError::AmbiguousPath(ref dirs)) if dirs.len() == 2));
    }

    #[test]
    fn test_glob_without_match_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.bam", dir.path().display());
        let set = FileSet::new(pattern).unwrap();
        assert!(set.is_empty());
        assert!(matches!(set.pathname(), Err(FileSetError::NoFilesFound(_))));
        assert_eq!(set.to_string(), "Found 0 file(s)");
    }

    #[test]
    fn test_single_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        // Brackets would be a character class if treated as a glob
        let files = touch(dir.path(), &["odd[1].fastq.gz"]);
        let set = FileSet::new(files[0].to_str().unwrap()).unwrap();
        assert_eq!(set.basenames(), vec!["odd[1].fastq.gz"]);
    }

    #[test]
    fn test_explicit_paths_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = touch(dir.path(), &["A.fastq.gz"]);
        files.push(dir.path().join("missing.fastq.gz"));

        let err = FileSet::new(files).unwrap_err();
        assert!(matches!(err, FileSetError::NotFound(ref p) if p.ends_with("missing.fastq.gz")));
    }

    #[test]
    fn test_explicit_paths_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let files = touch(dir.path(), &["A.fastq.gz", "B.fastq.gz"]);
        let doubled = vec![files[0].clone(), files[1].clone(), files[0].clone()];

        let set = FileSet::new(doubled).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_equivalent_paths_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let files = touch(dir.path(), &["A.fastq.gz"]);
        let dotted = dir.path().join(".").join("A.fastq.gz");

        let set = FileSet::new(vec![files[0].clone(), dotted]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.paths(), files.as_slice());
    }

    #[test]
    fn test_glob_skips_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &["A_R1_.fastq.gz", "A_R2_.fastq.gz", "._A_R1_.fastq.gz", "._A_R2_.fastq.gz"],
        );

        let pattern = format!("{}/*.fastq.gz", dir.path().display());
        let set = FileSet::new(pattern).unwrap();
        assert_eq!(set.basenames(), vec!["A_R1_.fastq.gz", "A_R2_.fastq.gz"]);

        let hidden = format!("{}/._*.fastq.gz", dir.path().display());
        assert_eq!(FileSet::new(hidden).unwrap().len(), 2);
    }

    #[test]
    fn test_derived_views() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["A.fastq.gz", "README"]);

        let set = FileSet::new(format!("{}/*", dir.path().display())).unwrap();
        assert_eq!(set.basenames(), vec!["A.fastq.gz", "README"]);
        assert_eq!(set.extension(), vec![".gz", ""]);
        assert_eq!(set.all_extensions(), vec!["fastq.gz", ""]);

        let expected = fs::canonicalize(dir.path()).unwrap();
        assert_eq!(set.pathname().unwrap(), expected);
        assert!(set.realpaths().iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_filter_basenames() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["A_R1_.fastq.gz", "notes.txt"]);

        let set = FileSet::new(format!("{}/*", dir.path().display())).unwrap();
        let kept = set.filter_basenames(|b| b.contains("_R1_"));
        assert_eq!(kept.basenames(), vec!["A_R1_.fastq.gz"]);
        assert_eq!(kept.realpaths().len(), 1);
        assert_eq!(kept.pattern(), set.pattern());
    }

    #[test]
    fn test_invalid_glob() {
        let err = FileSet::new("/nonexistent/[").unwrap_err();
        assert!(matches!(err, FileSetError::InvalidPattern { .. }));
    }
}
