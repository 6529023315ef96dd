use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::validation::{unescape, READ_PLACEHOLDER};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadTagError {
    #[error(
        "Invalid read tag '{0}': it must contain '[12]' exactly once to differentiate read 1 and read 2"
    )]
    InvalidReadTag(String),

    #[error("Uninformative read tag '{0}': it must contain more than just '[12]'")]
    UninformativeReadTag(String),
}

/// Which mate of a pair a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadIndex {
    One,
    Two,
}

impl ReadIndex {
    #[must_use]
    pub fn digit(self) -> char {
        match self {
            Self::One => '1',
            Self::Two => '2',
        }
    }
}

impl fmt::Display for ReadIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

/// A read tag such as `_R[12]_`: literal text around a read-number placeholder.
///
/// Backslash escapes in the user-supplied text are resolved to their literal
/// character, so `_[12]\.fastq` and `_[12].fastq` are the same tag. A `.` is
/// always a literal dot, never a wildcard.
#[derive(Debug, Clone)]
pub struct ReadTag {
    raw: String,
    prefix: String,
    suffix: String,
    matcher: Regex,
}

impl ReadTag {
    /// Parse a read tag
    ///
    /// # Errors
    ///
    /// Returns `ReadTagError::InvalidReadTag` if the placeholder is missing or
    /// repeated, or `ReadTagError::UninformativeReadTag` if nothing but the
    /// placeholder is left.
    pub fn parse(raw: &str) -> Result<Self, ReadTagError> {
        let (prefix, suffix) = raw
            .split_once(READ_PLACEHOLDER)
            .ok_or_else(|| ReadTagError::InvalidReadTag(raw.to_string()))?;
        if suffix.contains(READ_PLACEHOLDER) {
            return Err(ReadTagError::InvalidReadTag(raw.to_string()));
        }

        let prefix = unescape(prefix);
        let suffix = unescape(suffix);
        if prefix.is_empty() && suffix.is_empty() {
            return Err(ReadTagError::UninformativeReadTag(raw.to_string()));
        }

        let matcher = Regex::new(&format!(
            "{}[12]{}",
            regex::escape(&prefix),
            regex::escape(&suffix)
        ))
        .map_err(|_| ReadTagError::InvalidReadTag(raw.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            prefix,
            suffix,
            matcher,
        })
    }

    /// The tag as supplied by the user
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The literal tag for one read, e.g. `_R2_`
    #[must_use]
    pub fn substitute(&self, read: ReadIndex) -> String {
        format!("{}{}{}", self.prefix, read.digit(), self.suffix)
    }

    /// Whether the basename contains the tag for either read
    #[must_use]
    pub fn matches(&self, basename: &str) -> bool {
        self.matcher.is_match(basename)
    }

    /// The part of a basename before its first tag occurrence
    #[must_use]
    pub fn sample_tag<'a>(&self, basename: &'a str) -> Option<&'a str> {
        self.matcher.find(basename).map(|m| &basename[..m.start()])
    }
}

impl PartialEq for ReadTag {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.suffix == other.suffix
    }
}

impl Eq for ReadTag {}

impl fmt::Display for ReadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_tag() {
        let tag = ReadTag::parse("_R[12]_").unwrap();
        assert_eq!(tag.prefix(), "_R");
        assert_eq!(tag.suffix(), "_");
        assert_eq!(tag.substitute(ReadIndex::One), "_R1_");
        assert_eq!(tag.substitute(ReadIndex::Two), "_R2_");
    }

    #[test]
    fn test_missing_placeholder() {
        assert_eq!(
            ReadTag::parse("nope").unwrap_err(),
            ReadTagError::InvalidReadTag("nope".to_string())
        );
        assert!(matches!(
            ReadTag::parse("_R[12]_[12]"),
            Err(ReadTagError::InvalidReadTag(_))
        ));
    }

    #[test]
    fn test_placeholder_alone_is_uninformative() {
        assert_eq!(
            ReadTag::parse("[12]").unwrap_err(),
            ReadTagError::UninformativeReadTag("[12]".to_string())
        );
    }

    #[test]
    fn test_dot_is_literal() {
        let tag = ReadTag::parse("_[12].").unwrap();
        assert!(tag.matches("A_1.fastq.gz"));
        assert!(!tag.matches("A_1xfastq"));
        assert_eq!(tag.sample_tag("A_1.fastq.gz"), Some("A"));
    }

    #[test]
    fn test_escaped_tag() {
        let escaped = ReadTag::parse(r"_R[12]_\.fastq").unwrap();
        assert_eq!(escaped.suffix(), "_.fastq");
        assert_eq!(escaped, ReadTag::parse("_R[12]_.fastq").unwrap());
        assert_eq!(escaped.as_str(), r"_R[12]_\.fastq");
    }

    #[test]
    fn test_sample_tag_uses_first_occurrence() {
        let tag = ReadTag::parse("_R[12]_").unwrap();
        assert_eq!(tag.sample_tag("S1_R1_001_R2_.fastq.gz"), Some("S1"));
        assert_eq!(tag.sample_tag("S1.fastq.gz"), None);
    }
}
