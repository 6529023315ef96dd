use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::file_set::basename;
use crate::core::{FileSet, InputPattern, Pairing, ReadFiles, ReadIndex, ReadTag, SampleMap};
use crate::resolving::sample_keys::SampleKeyResolver;
use crate::resolving::ResolveError;
use crate::utils::validation::normalize_read_tag;

/// Groups the files of a set into samples with one or two reads.
///
/// Files are named `<SAMPLE><TAG><ANYTHING>`, where `<TAG>` is the read tag
/// with its placeholder replaced by `1` or `2`. Files without the tag are
/// dropped with a warning. Without a read tag every file is its own
/// single-end sample, named by its sample key.
#[derive(Debug, Clone)]
pub struct ReadPairResolver {
    file_set: FileSet,
    read_tag: Option<ReadTag>,
    sample_keys: Vec<String>,
    tags: Vec<String>,
}

impl ReadPairResolver {
    /// Resolve a pattern and group its files by read tag
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::FileSet` if the pattern cannot be resolved, and
    /// otherwise the errors of [`ReadPairResolver::from_file_set`].
    pub fn new(
        pattern: impl Into<InputPattern>,
        read_tag: Option<&str>,
        key_resolver: &SampleKeyResolver,
    ) -> Result<Self, ResolveError> {
        Self::from_file_set(FileSet::new(pattern)?, read_tag, key_resolver)
    }

    /// Group the files of an existing set by read tag
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::ReadTag` for a malformed tag,
    /// `ResolveError::NoSamplesFound` if no file carries the tag, or the sample
    /// key errors of [`SampleKeyResolver::sample_keys`].
    pub fn from_file_set(
        file_set: FileSet,
        read_tag: Option<&str>,
        key_resolver: &SampleKeyResolver,
    ) -> Result<Self, ResolveError> {
        let read_tag = normalize_read_tag(read_tag).map(ReadTag::parse).transpose()?;

        let file_set = match &read_tag {
            Some(tag) => {
                let kept = file_set.filter_basenames(|b| tag.matches(b));
                let dropped = file_set.len() - kept.len();
                if dropped > 0 {
                    warn!(
                        dropped,
                        read_tag = %tag,
                        "Filtered out files that do not contain the read tag"
                    );
                }
                kept
            }
            None => file_set,
        };

        let no_samples = || ResolveError::NoSamplesFound {
            pattern: file_set.pattern().to_string(),
            read_tag: read_tag.as_ref().map(ToString::to_string).unwrap_or_default(),
        };

        if file_set.is_empty() {
            return Err(no_samples());
        }

        let sample_keys = key_resolver.sample_keys(&file_set)?;

        let tags: BTreeSet<String> = match &read_tag {
            Some(tag) => file_set
                .basenames()
                .iter()
                .filter_map(|b| tag.sample_tag(b).map(str::to_string))
                .collect(),
            None => sample_keys.iter().cloned().collect(),
        };
        if tags.is_empty() {
            return Err(no_samples());
        }

        info!(samples = tags.len(), pattern = file_set.pattern(), "Found samples");

        Ok(Self {
            file_set,
            read_tag,
            sample_keys,
            tags: tags.into_iter().collect(),
        })
    }

    /// Files carrying the read tag
    #[must_use]
    pub fn file_set(&self) -> &FileSet {
        &self.file_set
    }

    #[must_use]
    pub fn read_tag(&self) -> Option<&ReadTag> {
        self.read_tag.as_ref()
    }

    /// Sample tags, sorted
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Files whose name starts with exactly `tag` followed by the tag for `read`
    ///
    /// Without a read tag, the file whose sample key is `tag` holds read 1.
    #[must_use]
    pub fn candidates(&self, tag: &str, read: ReadIndex) -> Vec<PathBuf> {
        let substituted = self.read_tag.as_ref().map(|t| t.substitute(read));
        self.file_set
            .paths()
            .iter()
            .zip(self.file_set.realpaths())
            .zip(&self.sample_keys)
            .filter(|((path, _), key)| match &substituted {
                Some(read_tag) => basename(path)
                    .split_once(read_tag.as_str())
                    .is_some_and(|(head, _)| head == tag),
                None => read == ReadIndex::One && key.as_str() == tag,
            })
            .map(|((_, realpath), _)| realpath.clone())
            .collect()
    }

    /// The file of one read of a sample
    ///
    /// A missing read 2 is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::MissingRead1` if no file holds read 1, or
    /// `ResolveError::AmbiguousCandidate` if more than one file matches.
    pub fn resolve(&self, tag: &str, read: ReadIndex) -> Result<Option<PathBuf>, ResolveError> {
        let mut candidates = self.candidates(tag, read);
        let read_tag = self
            .read_tag
            .as_ref()
            .map(|t| t.substitute(read))
            .unwrap_or_default();

        match (candidates.len(), read) {
            (0, ReadIndex::Two) => Ok(None),
            (0, ReadIndex::One) => Err(ResolveError::MissingRead1 {
                tag: tag.to_string(),
                read_tag,
            }),
            (1, _) => Ok(candidates.pop()),
            _ => Err(ResolveError::AmbiguousCandidate {
                tag: tag.to_string(),
                read_tag,
                candidates,
            }),
        }
    }

    /// Like [`ReadPairResolver::resolve`], defaulting to the only sample when `tag` is `None`
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::TagRequired` if `tag` is `None` and there are
    /// several samples, `ResolveError::UnknownTag` for a tag that is not a
    /// sample, and otherwise the errors of [`ReadPairResolver::resolve`].
    pub fn read_file(
        &self,
        tag: Option<&str>,
        read: ReadIndex,
    ) -> Result<Option<PathBuf>, ResolveError> {
        let tag = match tag {
            Some(tag) if self.tags.iter().any(|t| t == tag) => tag,
            Some(tag) => return Err(ResolveError::UnknownTag(tag.to_string())),
            None => match self.tags.as_slice() {
                [only] => only.as_str(),
                tags => return Err(ResolveError::TagRequired(tags.len())),
            },
        };
        self.resolve(tag, read)
    }

    /// Classify the set as paired-end or single-end
    ///
    /// Counts the sample tags that have a read 1 file and those that have a
    /// read 2 file.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InconsistentPairing` if only some samples have a read 2.
    pub fn pairing(&self) -> Result<Pairing, ResolveError> {
        if self.read_tag.is_none() {
            return Ok(Pairing::SingleEnded);
        }

        let count = |read: ReadIndex| {
            self.tags
                .iter()
                .filter(|tag| !self.candidates(tag, read).is_empty())
                .count()
        };
        let read1 = count(ReadIndex::One);
        let read2 = count(ReadIndex::Two);

        if read2 == 0 {
            Ok(Pairing::SingleEnded)
        } else if read1 == read2 {
            Ok(Pairing::Paired)
        } else {
            Err(ResolveError::InconsistentPairing {
                pattern: self.file_set.pattern().to_string(),
                read1,
                read2,
            })
        }
    }

    /// Resolve the files of every sample
    ///
    /// # Errors
    ///
    /// See [`ReadPairResolver::resolve`].
    pub fn sample_map(&self) -> Result<SampleMap, ResolveError> {
        let mut samples = SampleMap::new();
        for tag in &self.tags {
            let read1 = self
                .resolve(tag, ReadIndex::One)?
                .ok_or_else(|| ResolveError::MissingRead1 {
                    tag: tag.clone(),
                    read_tag: self
                        .read_tag
                        .as_ref()
                        .map(|t| t.substitute(ReadIndex::One))
                        .unwrap_or_default(),
                })?;
            let read2 = self.resolve(tag, ReadIndex::Two)?;
            samples.insert(tag.clone(), ReadFiles::new(read1, read2));
        }
        Ok(samples)
    }

    /// Pairing classification and sample map together
    ///
    /// # Errors
    ///
    /// See [`ReadPairResolver::pairing`] and [`ReadPairResolver::sample_map`].
    pub fn resolve_all(&self) -> Result<(SampleMap, Pairing), ResolveError> {
        let pairing = self.pairing()?;
        Ok((self.sample_map()?, pairing))
    }
}

/// Resolve a pattern into samples and their pairing
///
/// # Errors
///
/// Returns any [`ResolveError`] raised while building the file set, parsing
/// the read tag or template, computing sample keys, or resolving candidates.
pub fn resolve_read_pairs<S: AsRef<str>>(
    pattern: impl Into<InputPattern>,
    read_tag: Option<&str>,
    extra_prefixes: &[S],
    sample_pattern: Option<&str>,
) -> Result<(SampleMap, Pairing), ResolveError> {
    let key_resolver = SampleKeyResolver::from_options(extra_prefixes, sample_pattern)?;
    ReadPairResolver::new(pattern, read_tag, &key_resolver)?.resolve_all()
}
