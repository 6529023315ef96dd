use std::collections::{BTreeSet, HashSet};
use std::fmt;

use tracing::debug;

use crate::core::{FileSet, ReadFiles, SampleMap};
use crate::resolving::{AmbiguousToken, ResolveError};
use crate::utils::validation::{first_token, normalize_prefix, SAMPLE_PLACEHOLDER};

/// A filename template such as `{sample}_sorted.fastq.gz`.
///
/// The text around the placeholder must match literally; the sample is what
/// lies between, up to its first `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleTemplate {
    raw: String,
    prefix: String,
    suffix: String,
}

impl SampleTemplate {
    /// Parse a sample template
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidSamplePattern` unless the template contains
    /// `{sample}` exactly once.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let (prefix, suffix) = raw
            .split_once(SAMPLE_PLACEHOLDER)
            .ok_or_else(|| ResolveError::InvalidSamplePattern(raw.to_string()))?;
        if suffix.contains(SAMPLE_PLACEHOLDER) {
            return Err(ResolveError::InvalidSamplePattern(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The text matched by `{sample}`, if the basename fits the template
    #[must_use]
    pub fn extract<'a>(&self, basename: &'a str) -> Option<&'a str> {
        basename
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }
}

impl fmt::Display for SampleTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Leading name tokens shared by every file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixScan {
    /// Shared tokens, each with its trailing `.`
    pub prefixes: Vec<String>,
    /// Where the scan stopped, if it stopped on a token that was neither shared nor unique
    pub ambiguous_token: Option<AmbiguousToken>,
}

/// Scan dot-separated tokens left to right, collecting those common to all names.
///
/// The scan stops at the first token that differs between names. When that
/// token is not unique to each name, it is recorded so a later collision can
/// point at it; the decision is left to the uniqueness check.
#[must_use]
pub fn scan_common_prefixes<S: AsRef<str>>(names: &[S]) -> PrefixScan {
    let tokens: Vec<Vec<&str>> = names.iter().map(|n| n.as_ref().split('.').collect()).collect();
    let min_tokens = tokens.iter().map(Vec::len).min().unwrap_or(0);

    let mut scan = PrefixScan::default();
    for i in 0..min_tokens {
        let distinct: BTreeSet<&str> = tokens.iter().map(|t| t[i]).collect();
        if distinct.len() == 1 {
            scan.prefixes.extend(distinct.iter().map(|t| format!("{t}.")));
        } else {
            if distinct.len() != names.len() {
                let token = AmbiguousToken {
                    index: i,
                    values: distinct.iter().map(ToString::to_string).collect(),
                };
                debug!(%token, "Name token is neither shared nor unique, stopping prefix scan");
                scan.ambiguous_token = Some(token);
            }
            break;
        }
    }
    scan
}

/// Computes one sample key per file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleKeyResolver {
    extra_prefixes: Vec<String>,
    template: Option<SampleTemplate>,
}

impl SampleKeyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver from raw options
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidSamplePattern` for a malformed template.
    pub fn from_options<S: AsRef<str>>(
        extra_prefixes: &[S],
        sample_pattern: Option<&str>,
    ) -> Result<Self, ResolveError> {
        let mut resolver = Self::new().with_extra_prefixes(extra_prefixes);
        if let Some(pattern) = sample_pattern {
            resolver = resolver.with_template(SampleTemplate::parse(pattern)?);
        }
        Ok(resolver)
    }

    /// Prefixes to strip in addition to those common to every file
    #[must_use]
    pub fn with_extra_prefixes<S: AsRef<str>>(mut self, prefixes: &[S]) -> Self {
        self.extra_prefixes = prefixes.iter().map(|p| normalize_prefix(p.as_ref())).collect();
        self
    }

    /// Use a template instead of prefix stripping
    #[must_use]
    pub fn with_template(mut self, template: SampleTemplate) -> Self {
        self.template = Some(template);
        self
    }

    #[must_use]
    pub fn template(&self) -> Option<&SampleTemplate> {
        self.template.as_ref()
    }

    /// One sample key per file of the set, in file order
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::PatternMismatch` if a file does not fit the
    /// template, or `ResolveError::AmbiguousSampleNames` if two files end up
    /// with the same key.
    pub fn sample_keys(&self, file_set: &FileSet) -> Result<Vec<String>, ResolveError> {
        self.keys_for_names(file_set.basenames().as_slice())
    }

    /// One sample key per basename
    ///
    /// # Errors
    ///
    /// See [`SampleKeyResolver::sample_keys`].
    pub fn keys_for_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<String>, ResolveError> {
        if let Some(template) = &self.template {
            let keys = names
                .iter()
                .map(|name| {
                    let name = name.as_ref();
                    template
                        .extract(name)
                        .map(|sample| first_token(sample).to_string())
                        .ok_or_else(|| ResolveError::PatternMismatch {
                            pattern: template.to_string(),
                            filename: name.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            return check_unique(keys, Vec::new(), None);
        }

        // A single file keeps its name: there is nothing to compare against
        let mut scan = if names.len() > 1 {
            scan_common_prefixes(names)
        } else {
            PrefixScan::default()
        };
        scan.prefixes.extend(self.extra_prefixes.iter().cloned());
        debug!(prefixes = ?scan.prefixes, "Stripping prefixes from sample names");

        let keys = names
            .iter()
            .map(|name| {
                let mut rest = name.as_ref();
                for prefix in &scan.prefixes {
                    if let Some(stripped) = rest.strip_prefix(prefix.as_str()) {
                        rest = stripped;
                    }
                }
                first_token(rest).to_string()
            })
            .collect();

        check_unique(keys, scan.prefixes, scan.ambiguous_token)
    }

    /// Map each file's sample key to its canonical path
    ///
    /// # Errors
    ///
    /// See [`SampleKeyResolver::sample_keys`].
    pub fn resolve(&self, file_set: &FileSet) -> Result<SampleMap, ResolveError> {
        let keys = self.sample_keys(file_set)?;
        let mut samples = SampleMap::new();
        for (key, realpath) in keys.into_iter().zip(file_set.realpaths()) {
            samples.insert(key, ReadFiles::single(realpath.clone()));
        }
        Ok(samples)
    }
}

fn check_unique(
    keys: Vec<String>,
    prefixes: Vec<String>,
    ambiguous_token: Option<AmbiguousToken>,
) -> Result<Vec<String>, ResolveError> {
    let distinct: HashSet<&str> = keys.iter().map(String::as_str).collect();
    if distinct.len() == keys.len() {
        Ok(keys)
    } else {
        Err(ResolveError::AmbiguousSampleNames {
            prefixes,
            keys,
            ambiguous_token,
        })
    }
}

/// Resolve one sample key per file of a set
///
/// # Errors
///
/// Returns `ResolveError::InvalidSamplePattern`, `ResolveError::PatternMismatch`
/// or `ResolveError::AmbiguousSampleNames`.
pub fn resolve_sample_keys<S: AsRef<str>>(
    file_set: &FileSet,
    extra_prefixes: &[S],
    sample_pattern: Option<&str>,
) -> Result<SampleMap, ResolveError> {
    SampleKeyResolver::from_options(extra_prefixes, sample_pattern)?.resolve(file_set)
}
