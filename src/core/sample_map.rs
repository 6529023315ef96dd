use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Whether a set of reads is paired-end or single-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    Paired,
    SingleEnded,
}

impl Pairing {
    #[must_use]
    pub fn is_paired(self) -> bool {
        matches!(self, Self::Paired)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paired => write!(f, "paired-end"),
            Self::SingleEnded => write!(f, "single-end"),
        }
    }
}

/// The one or two files of a sample, read 1 first.
///
/// Serializes as a list of paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<PathBuf>")]
pub struct ReadFiles {
    read1: PathBuf,
    read2: Option<PathBuf>,
}

impl ReadFiles {
    pub fn new(read1: impl Into<PathBuf>, read2: Option<PathBuf>) -> Self {
        Self {
            read1: read1.into(),
            read2,
        }
    }

    pub fn single(read1: impl Into<PathBuf>) -> Self {
        Self::new(read1, None)
    }

    #[must_use]
    pub fn read1(&self) -> &Path {
        &self.read1
    }

    #[must_use]
    pub fn read2(&self) -> Option<&Path> {
        self.read2.as_deref()
    }

    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.read2.is_some()
    }

    /// Paths in read order
    #[must_use]
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.clone().into()
    }
}

impl From<ReadFiles> for Vec<PathBuf> {
    fn from(files: ReadFiles) -> Self {
        std::iter::once(files.read1).chain(files.read2).collect()
    }
}

/// Sample key to file(s), ordered by sample key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SampleMap(BTreeMap<String, ReadFiles>);

impl SampleMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sample, returning the files previously stored under the same key
    pub(crate) fn insert(&mut self, key: impl Into<String>, files: ReadFiles) -> Option<ReadFiles> {
        self.0.insert(key.into(), files)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ReadFiles> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReadFiles)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Paths of one sample in read order
    #[must_use]
    pub fn paths(&self, key: &str) -> Option<Vec<PathBuf>> {
        self.get(key).map(ReadFiles::to_vec)
    }

    /// A lookup function for workflow wildcard substitution
    ///
    /// The returned closure maps a sample key to its paths and performs no I/O.
    pub fn wildcard_resolver(&self) -> impl Fn(&str) -> Option<Vec<PathBuf>> + '_ {
        move |key| self.paths(key)
    }

    /// Number of samples that have a second read
    #[must_use]
    pub fn paired_count(&self) -> usize {
        self.0.values().filter(|f| f.is_paired()).count()
    }
}

impl<'a> IntoIterator for &'a SampleMap {
    type Item = (&'a String, &'a ReadFiles);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ReadFiles>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
