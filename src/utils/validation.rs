//! Centralized validation and normalization helpers.

/// Placeholder marking the two-way read alternation in a read tag.
pub const READ_PLACEHOLDER: &str = "[12]";

/// Placeholder marking the sample substring in a sample template.
pub const SAMPLE_PLACEHOLDER: &str = "{sample}";

/// Read tag used when a configuration does not provide one.
pub const DEFAULT_READ_TAG: &str = "_R[12]_";

/// Normalize a prefix so that it ends with exactly one `.`.
///
/// Leading and trailing dots are removed before the single trailing dot is
/// appended, so `"run1"`, `"run1."` and `".run1.."` all become `"run1."`.
///
/// # Examples
///
/// ```
/// use sample_solver::utils::validation::normalize_prefix;
///
/// assert_eq!(normalize_prefix("run1"), "run1.");
/// assert_eq!(normalize_prefix("run1."), "run1.");
/// assert_eq!(normalize_prefix(".run1.."), "run1.");
/// ```
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    format!("{}.", prefix.trim_matches('.'))
}

/// Normalize an optional read tag.
///
/// `None`, empty, and whitespace-only tags all mean "no read tag".
#[must_use]
pub fn normalize_read_tag(tag: Option<&str>) -> Option<&str> {
    tag.filter(|t| !t.trim().is_empty())
}

/// Drop backslash escapes from a user-supplied tag fragment.
///
/// Read tags are commonly written as regular expressions (`_R[12]_\.fastq`).
/// The escaped character is kept literally; a trailing lone backslash is kept.
#[must_use]
pub fn unescape(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut chars = fragment.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Text before the first `.` of a name (the whole name when it has no dot).
#[must_use]
pub fn first_token(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
