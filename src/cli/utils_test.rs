use std::path::PathBuf;

use crate::cli::utils::*;

#[test]
fn test_truncate_with_ellipsis_short_string() {
    let result = truncate_with_ellipsis("hello", 10);
    assert_eq!(result, "hello");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    let result = truncate_with_ellipsis("PharmGKB level of evidence for codeine-CYP2D6", 12);
    assert_eq!(result, "PharmGKB ...");
}

#[test]
fn test_truncate_with_tiny_max_does_not_panic() {
    assert_eq!(truncate_with_ellipsis("abcdef", 2), "...");
}

#[test]
fn test_or_dash() {
    assert_eq!(or_dash(None), "-");
    assert_eq!(or_dash(Some("1A")), "1A");
}

#[test]
fn test_files_table_lists_paths() {
    let table = files_table(&[PathBuf::from("out/drugs.json")]);
    assert!(table.contains("Written"));
    assert!(table.contains("out/drugs.json"));
}

#[test]
fn test_files_table_empty() {
    assert_eq!(files_table(&[]), "No files written.");
}

#[test]
fn test_counts_table() {
    let table = counts_table(&[("Pairs submitted", 2), ("Changes applied", 1)]);
    assert!(table.contains("Pairs submitted"));
    assert!(table.contains("Count"));
}

#[test]
fn test_ensure_dir_creates_nested_directories() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let nested = temp_dir.path().join("a/b");
    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
}
