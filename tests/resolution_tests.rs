//! End-to-end sample resolution tests
//!
//! These tests build small directories of empty files and check the sample
//! maps and pairing deduced from their names.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use sample_solver::core::{FileSetError, ReadTagError};
use sample_solver::{
    resolve_read_pairs, resolve_sample_keys, FileSet, InputPattern, Pairing, ResolveError,
};

const NO_PREFIXES: &[&str] = &[];

fn fixture(names: &[&str]) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for name in names {
        fs::write(dir.path().join(name), b"").expect("Failed to create file");
    }
    let pattern = format!("{}/*.fastq.gz", dir.path().display());
    (dir, pattern)
}

fn real(dir: &Path, name: &str) -> PathBuf {
    fs::canonicalize(dir.join(name)).expect("Failed to canonicalize")
}

/// Files sharing a leading token are named by what follows it
#[test]
fn test_common_prefix_two_samples() {
    let (_dir, pattern) = fixture(&["demultiplex.A.fastq.gz", "demultiplex.B.fastq.gz"]);
    let file_set = FileSet::new(pattern.as_str()).unwrap();
    let samples = resolve_sample_keys(&file_set, NO_PREFIXES, None).unwrap();

    assert_eq!(samples.keys().collect::<Vec<_>>(), vec!["A", "B"]);
}

/// A prefix present on only some files cannot be stripped safely
#[test]
fn test_ambiguous_mixture_fails() {
    let (_dir, pattern) = fixture(&[
        "prefix.mess.A.fastq.gz",
        "prefix.mess.B.fastq.gz",
        "prefix.A.fastq.gz",
        "prefix.B.fastq.gz",
    ]);
    let file_set = FileSet::new(pattern.as_str()).unwrap();
    let err = resolve_sample_keys(&file_set, NO_PREFIXES, None).unwrap_err();

    assert!(matches!(err, ResolveError::AmbiguousSampleNames { .. }));
    let message = err.to_string();
    assert!(message.contains("prefix."), "message: {message}");
    assert!(message.contains("mess"), "message: {message}");
}

#[test]
fn test_paired_detection() {
    let (dir, pattern) = fixture(&["test_R1_.fastq.gz", "test_R2_.fastq.gz"]);
    let (samples, pairing) =
        resolve_read_pairs(pattern.as_str(), Some("_R[12]_"), NO_PREFIXES, None).unwrap();

    assert!(pairing.is_paired());
    assert_eq!(samples.len(), 1);
    assert_eq!(
        samples.paths("test").unwrap(),
        vec![
            real(dir.path(), "test_R1_.fastq.gz"),
            real(dir.path(), "test_R2_.fastq.gz")
        ]
    );
}

#[test]
fn test_single_ended_detection() {
    let (dir, pattern) = fixture(&["test_R1_.fastq.gz"]);
    let (samples, pairing) =
        resolve_read_pairs(pattern.as_str(), Some("_R[12]_"), NO_PREFIXES, None).unwrap();

    assert_eq!(pairing, Pairing::SingleEnded);
    assert_eq!(
        samples.paths("test").unwrap(),
        vec![real(dir.path(), "test_R1_.fastq.gz")]
    );
}

#[test]
fn test_uninformative_and_invalid_tags() {
    let (_dir, pattern) = fixture(&["test_R1_.fastq.gz"]);

    let err = resolve_read_pairs(pattern.as_str(), Some("[12]"), NO_PREFIXES, None).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::ReadTag(ReadTagError::UninformativeReadTag(_))
    ));

    let err = resolve_read_pairs(pattern.as_str(), Some("nope"), NO_PREFIXES, None).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::ReadTag(ReadTagError::InvalidReadTag(_))
    ));
}

#[test]
fn test_single_file_keeps_first_token() {
    let (_dir, pattern) = fixture(&["run42.lane1.S1.fastq.gz"]);
    let file_set = FileSet::new(pattern.as_str()).unwrap();
    let samples = resolve_sample_keys(&file_set, NO_PREFIXES, None).unwrap();

    assert_eq!(samples.keys().collect::<Vec<_>>(), vec!["run42"]);
}

#[test]
fn test_template_recovers_samples() {
    let names = ["S1", "S_2", "sample-3", "X"];
    let files: Vec<String> = names.iter().map(|n| format!("run.{n}.fastq.gz")).collect();
    let (_dir, pattern) = fixture(&files.iter().map(String::as_str).collect::<Vec<_>>());

    let file_set = FileSet::new(pattern.as_str()).unwrap();
    let samples = resolve_sample_keys(&file_set, NO_PREFIXES, Some("run.{sample}.fastq.gz")).unwrap();

    let recovered: HashSet<&str> = samples.keys().collect();
    let expected: HashSet<&str> = names.into_iter().collect();
    assert_eq!(recovered, expected);
}

#[test]
fn test_keys_are_unique() {
    let (_dir, pattern) = fixture(&[
        "A_R1_.fastq.gz",
        "A_R2_.fastq.gz",
        "B_R1_.fastq.gz",
        "B_R2_.fastq.gz",
        "C_R1_.fastq.gz",
        "C_R2_.fastq.gz",
    ]);
    let (samples, _) =
        resolve_read_pairs(pattern.as_str(), Some("_R[12]_"), NO_PREFIXES, None).unwrap();

    let keys: Vec<&str> = samples.keys().collect();
    let unique: HashSet<&str> = keys.iter().copied().collect();
    assert_eq!(keys.len(), unique.len());
    assert_eq!(samples.paired_count(), 3);
}

#[test]
fn test_resolution_is_idempotent() {
    let (_dir, pattern) = fixture(&[
        "demultiplex.A_R1_.fastq.gz",
        "demultiplex.A_R2_.fastq.gz",
        "demultiplex.B_R1_.fastq.gz",
    ]);
    let first = resolve_read_pairs(pattern.as_str(), Some("_R[12]_"), &["demultiplex"], None);
    let second = resolve_read_pairs(pattern.as_str(), Some("_R[12]_"), &["demultiplex"], None);

    // Mixed pairing fails the same way each time
    assert_eq!(
        first.unwrap_err().to_string(),
        second.unwrap_err().to_string()
    );
}

#[test]
fn test_stray_files_are_ignored() {
    let (dir, pattern) = fixture(&[
        "S1_R1_001.fastq.gz",
        "S1_R2_001.fastq.gz",
        "Undetermined.fastq.gz",
    ]);
    let (samples, pairing) =
        resolve_read_pairs(pattern.as_str(), Some("_R[12]_"), NO_PREFIXES, None).unwrap();

    assert_eq!(pairing, Pairing::Paired);
    assert_eq!(samples.keys().collect::<Vec<_>>(), vec!["S1"]);
    assert_eq!(
        samples.get("S1").unwrap().read1(),
        real(dir.path(), "S1_R1_001.fastq.gz")
    );
}

#[test]
fn test_explicit_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.fastq.gz");
    let err = FileSet::new(InputPattern::Paths(vec![missing])).unwrap_err();
    assert!(matches!(err, FileSetError::NotFound(_)));
}
